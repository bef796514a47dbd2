//! QuadraMaster backend: a step-by-step tutor for factoring and solving
//! quadratics of the form ax^2 + bx + c.

pub mod config;
pub mod domain;
pub mod logic;
pub mod normalize;
pub mod numeric;
pub mod openai;
pub mod parser;
pub mod problem;
pub mod protocol;
pub mod routes;
pub mod seeds;
pub mod session;
pub mod solver;
pub mod state;
pub mod telemetry;
pub mod util;
pub mod validator;
