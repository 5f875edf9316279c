//! # Traction Equations
//!
//! The physical model as pure functions. Keeping every formula here allows:
//! - Verification against railway practice in one place
//! - Documentation of units and assumptions next to the code
//! - Reuse by every sweep without re-deriving anything
//!
//! ## Modules
//!
//! - [`resistance`] - Rolling, gradient, curvature and starting resistance
//! - [`drivetrain`] - Speed/RPM conversion, power limit, rail force, adhesion
//! - [`registry`] - Equation metadata for the generated reference document
//!
//! ## Units
//!
//! - **Speed**: km/h
//! - **Weight**: metric tonnes
//! - **Force**: Newtons
//! - **Gradient**: percent grade
//! - **Curve**: curve degrees

pub mod drivetrain;
pub mod registry;
pub mod resistance;

// Re-export commonly used items
pub use resistance::{
    curvature_resistance,
    gradient_resistance,
    locomotive_resistance,
    rolling_resistance_locomotive,
    rolling_resistance_wagon,
    starting_resistance_locomotive,
    starting_resistance_wagon,
    wagon_resistance,
    ResistanceMode,
};

pub use drivetrain::{
    adhesion_limit,
    engine_rpm,
    generated_tractive_force,
    power_limited_torque,
    shaft_power_kw,
    speed_at_engine_rpm,
    torque_for_power,
    wheel_rpm,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
