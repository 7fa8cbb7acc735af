//! Noise functions: deterministic modifiers from generation index to value.
//!
//! The generator uses one noise function for the inward step of each
//! generation and one for the length/radius scale. Every variant is a pure
//! function of the generation index, so the same configuration always
//! produces the same map.

use crate::rng::Rng;

/// A pure function `generation -> f64`.
///
/// ## Rust Lesson #12: Enums Instead of Closures
///
/// A boxed closure could capture mutable state and return different values
/// on each call. A closed enum cannot; `Custom` only accepts a plain `fn`
/// pointer, which has no environment to capture.
#[derive(Debug, Clone, Copy, Default)]
pub enum Noise {
    /// `g`
    #[default]
    Identity,
    /// `c`, whatever the generation
    Constant(f64),
    /// `slope·g + offset`
    Linear { slope: f64, offset: f64 },
    /// `g^exponent`
    Power { exponent: f64 },
    /// `g + amplitude·u` with `u ∈ [-1, 1)` drawn from `(seed, g)`
    Jitter { seed: u64, amplitude: f64 },
    /// Any other pure function
    Custom(fn(usize) -> f64),
}

impl Noise {
    pub fn eval(&self, generation: usize) -> f64 {
        let g = generation as f64;
        match *self {
            Noise::Identity => g,
            Noise::Constant(c) => c,
            Noise::Linear { slope, offset } => slope * g + offset,
            Noise::Power { exponent } => g.powf(exponent),
            Noise::Jitter { seed, amplitude } => {
                g + amplitude * Rng::for_generation(seed, generation).next_signed()
            }
            Noise::Custom(f) => f(generation),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Noise::Identity => "identity",
            Noise::Constant(_) => "constant",
            Noise::Linear { .. } => "linear",
            Noise::Power { .. } => "power",
            Noise::Jitter { .. } => "jitter",
            Noise::Custom(_) => "custom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_by_default() {
        let noise = Noise::default();
        for g in 0..5 {
            assert_eq!(noise.eval(g), g as f64);
        }
    }

    #[test]
    fn closed_forms() {
        assert_eq!(Noise::Constant(2.5).eval(9), 2.5);
        assert_eq!(Noise::Linear { slope: 0.5, offset: 1.0 }.eval(4), 3.0);
        assert_eq!(Noise::Power { exponent: 2.0 }.eval(3), 9.0);
    }

    #[test]
    fn jitter_is_deterministic_and_bounded() {
        let noise = Noise::Jitter { seed: 11, amplitude: 0.25 };
        for g in 1..20 {
            let v = noise.eval(g);
            assert_eq!(v, noise.eval(g), "generation {} changed between calls", g);
            assert!((v - g as f64).abs() <= 0.25, "generation {} jittered to {}", g, v);
        }
    }

    #[test]
    fn custom_function() {
        fn halves(g: usize) -> f64 {
            g as f64 / 2.0
        }
        let noise = Noise::Custom(halves);
        assert_eq!(noise.eval(3), 1.5);
        assert_eq!(noise.name(), "custom");
    }
}
