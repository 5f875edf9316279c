//! # Equation Registry
//!
//! Central registry of every formula the traction model uses. Each equation
//! carries its formula, reference, variables and the function implementing
//! it, so the physical model can be audited from one document.
//!
//! ## Usage
//!
//! ```rust
//! use traction_core::equations::registry::Equation;
//!
//! let meta = Equation::AdhesionLimit.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! assert_eq!(meta.source_function, "adhesion_limit");
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// Source of an equation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// Empirical coefficient from railway operating practice
    RailwayPractice { topic: &'static str },
    /// Drivetrain kinematics (gearing and wheel geometry)
    Kinematics,
    /// Fundamental mechanics (no specific reference needed)
    Mechanics,
}

impl CodeReference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            CodeReference::RailwayPractice { topic } => format!("Railway practice: {}", topic),
            CodeReference::Kinematics => "Drivetrain Kinematics".to_string(),
            CodeReference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::RailwayPractice { .. } => "Railway practice",
            CodeReference::Kinematics => "Kinematics",
            CodeReference::Mechanics => "Mechanics",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Forces opposing motion
    Resistance,
    /// Speed, RPM, torque and power conversions
    Drivetrain,
    /// Force at the rail and its limits
    Traction,
    /// Normalization of user-facing track units
    UnitConversions,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Resistance => "Resistance",
            EquationCategory::Drivetrain => "Drivetrain",
            EquationCategory::Traction => "Traction",
            EquationCategory::UnitConversions => "Unit Conversions",
        }
    }

    /// Sort order in the reference document (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::UnitConversions => 1,
            EquationCategory::Resistance => 2,
            EquationCategory::Drivetrain => 3,
            EquationCategory::Traction => 4,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "W", "v", "μ")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "t", "km/h", "N")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name (e.g., "Adhesion Limit")
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Source of the formula or its coefficients
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// Every equation used by the traction model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Unit Conversions
    // -------------------------------------------------------------------------
    /// i = tan(θ)·100
    SlopeDegreeToPercent,
    /// D = 1750 / r
    CurveRadiusToDegree,

    // -------------------------------------------------------------------------
    // Resistance
    // -------------------------------------------------------------------------
    /// (A + Bv + Cv²)·W·g with axle-load dependent A
    LocomotiveRollingResistance,
    /// (A + Bv + Cv²)·W·g with wagon coefficients
    WagonRollingResistance,
    /// W·1000·g·i/100
    GradientResistance,
    /// 0.4·W·D·g
    CurvatureResistance,
    /// 6·W·g
    LocomotiveStartingResistance,
    /// 4·W·g
    WagonStartingResistance,

    // -------------------------------------------------------------------------
    // Drivetrain
    // -------------------------------------------------------------------------
    /// Wheel RPM from speed
    WheelRpm,
    /// Engine RPM from wheel RPM
    EngineRpm,
    /// Linear interpolation on the torque curve
    TorqueInterpolation,
    /// P = N·T·2π/60000
    ShaftPower,
    /// T = P·60000/(N·2π) when P exceeds peak
    PowerLimitedTorque,

    // -------------------------------------------------------------------------
    // Traction
    // -------------------------------------------------------------------------
    /// F = 2·T·G·R/D
    GeneratedTractiveForce,
    /// F_adh = W·μ·1000·g
    AdhesionLimit,
    /// min(F, F_adh)
    AchievableForce,
    /// Remaining force per tonne of probe wagon
    ShuntingCapacity,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            // Unit conversions
            Equation::SlopeDegreeToPercent => EquationMetadata {
                name: "Slope Angle to Percent Grade",
                description: "Converts an inclination angle to percent grade",
                formula_plain: "i = tan(theta) * 100",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("i", "Gradient", "%"),
                    Variable::new("theta", "Inclination angle", "deg"),
                ],
                assumptions: vec![],
                category: EquationCategory::UnitConversions,
                source_module: "units.rs",
                source_function: "SlopeUnit::to_percent",
            },

            Equation::CurveRadiusToDegree => EquationMetadata {
                name: "Curve Radius to Curve Degree",
                description: "Converts a curve radius to the equivalent curve degree",
                formula_plain: "D = 1750 / r",
                reference: CodeReference::RailwayPractice { topic: "curve designation" },
                variables: vec![
                    Variable::new("D", "Curve severity", "deg"),
                    Variable::new("r", "Curve radius", "m"),
                ],
                assumptions: vec!["r = 0 is read as straight track (D = 0)"],
                category: EquationCategory::UnitConversions,
                source_module: "units.rs",
                source_function: "CurveUnit::to_degree",
            },

            // Resistance
            Equation::LocomotiveRollingResistance => EquationMetadata {
                name: "Locomotive Rolling Resistance",
                description: "Bearing, rolling and aerodynamic resistance of the locomotive",
                formula_plain: "F = (A + B*v + C*v^2) * W * g, A = 0.647 + 13.17/(W/n), B = 0.00933, C = 0.057/W",
                reference: CodeReference::RailwayPractice { topic: "locomotive resistance" },
                variables: vec![
                    Variable::new("F", "Resistance force", "N"),
                    Variable::new("v", "Speed", "km/h"),
                    Variable::new("W", "Locomotive weight", "t"),
                    Variable::new("n", "Number of axles", "-"),
                    Variable::new("g", "Standard gravity (9.81)", "m/s^2"),
                ],
                assumptions: vec!["Returns 0 for W <= 0 or n = 0", "Still air"],
                category: EquationCategory::Resistance,
                source_module: "equations/resistance.rs",
                source_function: "rolling_resistance_locomotive",
            },

            Equation::WagonRollingResistance => EquationMetadata {
                name: "Wagon Rolling Resistance",
                description: "Rolling resistance of the trailing wagon load",
                formula_plain: "F = (A + B*v + C*v^2) * W * g, A = 0.6438797, B = 0.01047218, C = 0.00007323",
                reference: CodeReference::RailwayPractice { topic: "wagon resistance" },
                variables: vec![
                    Variable::new("F", "Resistance force", "N"),
                    Variable::new("v", "Speed", "km/h"),
                    Variable::new("W", "Wagon load", "t"),
                ],
                assumptions: vec!["Returns 0 for W <= 0", "One polynomial for all wagon types"],
                category: EquationCategory::Resistance,
                source_module: "equations/resistance.rs",
                source_function: "rolling_resistance_wagon",
            },

            Equation::GradientResistance => EquationMetadata {
                name: "Gradient Resistance",
                description: "Component of gravity along an inclined track",
                formula_plain: "F = W * 1000 * g * i / 100",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("W", "Weight", "t"),
                    Variable::new("i", "Gradient", "%"),
                ],
                assumptions: vec!["Small-angle approximation: sin(theta) ~ tan(theta)"],
                category: EquationCategory::Resistance,
                source_module: "equations/resistance.rs",
                source_function: "gradient_resistance",
            },

            Equation::CurvatureResistance => EquationMetadata {
                name: "Curvature Resistance",
                description: "Flange friction and wheel slip when negotiating curves",
                formula_plain: "F = 0.4 * W * D * g",
                reference: CodeReference::RailwayPractice { topic: "curve resistance" },
                variables: vec![
                    Variable::new("W", "Weight", "t"),
                    Variable::new("D", "Curve severity", "deg"),
                ],
                assumptions: vec!["Empirical coefficient 0.4 kgf/t per degree"],
                category: EquationCategory::Resistance,
                source_module: "equations/resistance.rs",
                source_function: "curvature_resistance",
            },

            Equation::LocomotiveStartingResistance => EquationMetadata {
                name: "Locomotive Starting Resistance",
                description: "Extra breakaway resistance of a locomotive starting from rest",
                formula_plain: "F = 6.0 * W * g",
                reference: CodeReference::RailwayPractice { topic: "starting resistance" },
                variables: vec![Variable::new("W", "Locomotive weight", "t")],
                assumptions: vec!["Applied to start-from-rest sweeps only"],
                category: EquationCategory::Resistance,
                source_module: "equations/resistance.rs",
                source_function: "starting_resistance_locomotive",
            },

            Equation::WagonStartingResistance => EquationMetadata {
                name: "Wagon Starting Resistance",
                description: "Extra breakaway resistance of wagons starting from rest",
                formula_plain: "F = 4.0 * W * g",
                reference: CodeReference::RailwayPractice { topic: "starting resistance" },
                variables: vec![Variable::new("W", "Wagon load", "t")],
                assumptions: vec!["Applied to start-from-rest sweeps only", "Roller-bearing stock"],
                category: EquationCategory::Resistance,
                source_module: "equations/resistance.rs",
                source_function: "starting_resistance_wagon",
            },

            // Drivetrain
            Equation::WheelRpm => EquationMetadata {
                name: "Wheel Speed",
                description: "Wheel rotational speed for a vehicle speed",
                formula_plain: "N_wheel = (v / 3.6) / (pi * D_w) * 60",
                reference: CodeReference::Kinematics,
                variables: vec![
                    Variable::new("v", "Vehicle speed", "km/h"),
                    Variable::new("D_w", "Wheel diameter", "m"),
                ],
                assumptions: vec!["No wheel slip"],
                category: EquationCategory::Drivetrain,
                source_module: "equations/drivetrain.rs",
                source_function: "wheel_rpm",
            },

            Equation::EngineRpm => EquationMetadata {
                name: "Engine Speed",
                description: "Engine speed through the gearbox and final drive",
                formula_plain: "N = N_wheel * G * R",
                reference: CodeReference::Kinematics,
                variables: vec![
                    Variable::new("G", "Gear ratio", "-"),
                    Variable::new("R", "Rear-axle ratio", "-"),
                ],
                assumptions: vec!["Inverse: v = N * pi * D_w / (G * R * 60) * 3.6"],
                category: EquationCategory::Drivetrain,
                source_module: "equations/drivetrain.rs",
                source_function: "engine_rpm",
            },

            Equation::TorqueInterpolation => EquationMetadata {
                name: "Torque Curve Interpolation",
                description: "Engine torque between tabulated curve points",
                formula_plain: "T = T_0 + (N - N_0) * (T_1 - T_0) / (N_1 - N_0)",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("N_0, N_1", "Bracketing curve speeds", "RPM"),
                    Variable::new("T_0, T_1", "Torque at the bracketing speeds", "N*m"),
                ],
                assumptions: vec!["Clamped to the endpoint torque outside the curve"],
                category: EquationCategory::Drivetrain,
                source_module: "torque_curve.rs",
                source_function: "interpolate",
            },

            Equation::ShaftPower => EquationMetadata {
                name: "Shaft Power",
                description: "Engine power from torque and speed",
                formula_plain: "P = N * T * 2 * pi / 60000",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("P", "Power", "kW"),
                    Variable::new("N", "Engine speed", "RPM"),
                    Variable::new("T", "Torque", "N*m"),
                ],
                assumptions: vec![],
                category: EquationCategory::Drivetrain,
                source_module: "equations/drivetrain.rs",
                source_function: "shaft_power_kw",
            },

            Equation::PowerLimitedTorque => EquationMetadata {
                name: "Power-Limited Torque",
                description: "Torque capped so shaft power never exceeds peak power",
                formula_plain: "T = P_peak * 60000 / (N * 2 * pi) if P > P_peak and N > 0",
                reference: CodeReference::Mechanics,
                variables: vec![Variable::new("P_peak", "Peak engine power", "kW")],
                assumptions: vec!["No limit applied at standstill"],
                category: EquationCategory::Drivetrain,
                source_module: "equations/drivetrain.rs",
                source_function: "power_limited_torque",
            },

            // Traction
            Equation::GeneratedTractiveForce => EquationMetadata {
                name: "Generated Tractive Force",
                description: "Force at the rail produced by engine torque",
                formula_plain: "F = 2 * T * G * R / D_w",
                reference: CodeReference::Kinematics,
                variables: vec![
                    Variable::new("F", "Tractive force", "N"),
                    Variable::new("T", "Engine torque", "N*m"),
                    Variable::new("D_w", "Wheel diameter", "m"),
                ],
                assumptions: vec!["Lossless transmission"],
                category: EquationCategory::Traction,
                source_module: "equations/drivetrain.rs",
                source_function: "generated_tractive_force",
            },

            Equation::AdhesionLimit => EquationMetadata {
                name: "Adhesion Limit",
                description: "Largest force the wheel-rail contact transmits before slipping",
                formula_plain: "F_adh = W * mu * 1000 * g",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("W", "Locomotive weight", "t"),
                    Variable::new("mu", "Wheel-rail friction coefficient", "-"),
                ],
                assumptions: vec!["All axles driven", "Full weight on driven axles"],
                category: EquationCategory::Traction,
                source_module: "equations/drivetrain.rs",
                source_function: "adhesion_limit",
            },

            Equation::AchievableForce => EquationMetadata {
                name: "Achievable Tractive Force",
                description: "Force actually delivered: the drivetrain output capped by adhesion",
                formula_plain: "F_ach = min(F, F_adh)",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("F", "Generated tractive force", "N"),
                    Variable::new("F_adh", "Adhesion limit", "N"),
                ],
                assumptions: vec!["Sustainable when F_ach >= total resistance"],
                category: EquationCategory::Traction,
                source_module: "calculations/solver.rs",
                source_function: "TractionSolver::evaluate",
            },

            Equation::ShuntingCapacity => EquationMetadata {
                name: "Shunting Capacity",
                description: "Wagon tonnage the force left after locomotive resistance can move",
                formula_plain: "Q = (F_ach - F_loco) / F_wagon(1 t), Q = 0 if F_ach <= F_loco",
                reference: CodeReference::RailwayPractice { topic: "shunting capacity" },
                variables: vec![
                    Variable::new("Q", "Shuntable load", "t"),
                    Variable::new("F_loco", "Locomotive resistance incl. breakaway", "N"),
                    Variable::new("F_wagon(1 t)", "Resistance of a 1-tonne probe wagon incl. breakaway", "N"),
                ],
                assumptions: vec!["Never negative"],
                category: EquationCategory::Traction,
                source_module: "calculations/curves.rs",
                source_function: "shunting_capacity_tonnes",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories that contain at least one equation
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![Resistance, Drivetrain, Traction, UnitConversions];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    // Unit conversions
    Equation::SlopeDegreeToPercent,
    Equation::CurveRadiusToDegree,
    // Resistance
    Equation::LocomotiveRollingResistance,
    Equation::WagonRollingResistance,
    Equation::GradientResistance,
    Equation::CurvatureResistance,
    Equation::LocomotiveStartingResistance,
    Equation::WagonStartingResistance,
    // Drivetrain
    Equation::WheelRpm,
    Equation::EngineRpm,
    Equation::TorqueInterpolation,
    Equation::ShaftPower,
    Equation::PowerLimitedTorque,
    // Traction
    Equation::GeneratedTractiveForce,
    Equation::AdhesionLimit,
    Equation::AchievableForce,
    Equation::ShuntingCapacity,
];

// ============================================================================
// Markdown Generation
// ============================================================================

/// Generate the equations reference document.
///
/// ```rust
/// use traction_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Traction Equations Reference"));
/// assert!(markdown.contains("## Resistance"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(r#"# Traction Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every formula used by the locomotive traction model.
Each equation includes its formula, reference, source location, and assumptions.

## Conventions

| Quantity | Unit |
|----------|------|
| Speed | km/h |
| Weight | metric tonnes (t) |
| Force | Newtons (N) |
| Torque | N*m |
| Power | kW |
| Gradient | percent grade |
| Curve | curve degrees |
| g | 9.81 m/s^2 |

Running-speed searches use rolling, gradient and curvature resistance.
Start-from-rest sweeps add the starting (breakaway) term.

---

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.symbol, var.description, var.units
                    ));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`](src/{})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 17);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
            assert!(!meta.source_module.is_empty(), "Equation {:?} missing source_module", eq);
            assert!(!meta.source_function.is_empty(), "Equation {:?} missing source_function", eq);
        }

        let adhesion = Equation::AdhesionLimit.metadata();
        assert!(adhesion.formula_plain.contains("mu * 1000 * g"));
    }

    #[test]
    fn test_code_reference_citation() {
        let r = CodeReference::RailwayPractice { topic: "curve resistance" };
        assert_eq!(r.citation(), "Railway practice: curve resistance");
        assert_eq!(CodeReference::Mechanics.short_form(), "Mechanics");
    }

    #[test]
    fn test_every_equation_in_one_category() {
        let total: usize = Equation::all_categories()
            .into_iter()
            .map(|c| Equation::in_category(c).len())
            .sum();
        assert_eq!(total, ALL_EQUATIONS.len());
    }

    #[test]
    fn test_categories_sorted() {
        let cats = Equation::all_categories();
        let orders: Vec<u8> = cats.iter().map(|c| c.sort_order()).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted, "Categories should be sorted by sort_order");
    }

    #[test]
    fn test_generate_equations_markdown() {
        let markdown = generate_equations_markdown();

        assert!(markdown.contains("# Traction Equations Reference"), "Missing title");
        assert!(markdown.contains("Auto-generated from source code"), "Missing auto-gen notice");
        assert!(markdown.contains("## Unit Conversions"));
        assert!(markdown.contains("## Resistance"));
        assert!(markdown.contains("## Drivetrain"));
        assert!(markdown.contains("## Traction"));
        assert!(markdown.contains("### Adhesion Limit"));
        assert!(markdown.contains("`F = 0.4 * W * D * g`"));
        assert!(markdown.contains("src/equations/resistance.rs"));
        assert!(markdown.contains("**Total Equations:** 17"));
        assert!(markdown.contains("**Categories:** 4"));
    }
}
