//! A postfix (reverse-Polish) calculator engine.
//!
//! Values, variables, constants and operators are pushed one at a time onto
//! an [`Engine`]; after each push the whole stack is evaluated from the top.
//! The stack can also be rendered as infix text, flattened to strings for
//! storage, and swept across a range of one variable to produce plot data.

pub mod codec;
pub mod engine;
pub mod error;
pub mod eval;
pub mod registry;
pub mod render;
pub mod sample;
pub mod token;

pub use codec::{CodecError, Program};
pub use engine::Engine;
pub use error::{Arity, CalcResult, EvalError};
pub use registry::Registry;
pub use sample::{sample, sample_program, PlotStats, Point, Sweep, SweepError, MAX_SWEEP_STEPS};
pub use token::{format_number, parse_number, Precedence, Token};
