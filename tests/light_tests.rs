use logo_viewer::error::Error;
use logo_viewer::light::{LightControl, DEFAULT_INTENSITY};

#[cfg(test)]
mod light_tests {
    use super::*;

    #[test]
    fn test_default_intensity_is_0_1() {
        let control = LightControl::new();
        assert_eq!(control.value(), 0.1);
        assert_eq!(control.value(), DEFAULT_INTENSITY);
    }

    #[test]
    fn test_valid_input_is_stored_exactly() {
        // Scenario A: input "0.5" renders at 0.5.
        let mut control = LightControl::new();
        let stored = control.set_from_input("0.5").unwrap();
        assert_eq!(stored, 0.5);
        assert_eq!(control.value(), 0.5);
    }

    #[test]
    fn test_whitespace_is_tolerated() {
        let mut control = LightControl::new();
        assert_eq!(control.set_from_input("  2.25 ").unwrap(), 2.25);
    }

    #[test]
    fn test_invalid_input_keeps_previous_value() {
        let mut control = LightControl::new();
        control.set_from_input("0.7").unwrap();

        let err = control.set_from_input("not a number").unwrap_err();
        assert!(matches!(err, Error::InvalidIntensityInput { .. }));
        assert_eq!(control.value(), 0.7);
    }

    #[test]
    fn test_empty_input_keeps_previous_value() {
        let mut control = LightControl::new();
        assert!(control.set_from_input("").is_err());
        assert_eq!(control.value(), DEFAULT_INTENSITY);
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let mut control = LightControl::new();
        assert!(control.set_from_input("NaN").is_err());
        assert!(control.set_from_input("inf").is_err());
        assert_eq!(control.value(), DEFAULT_INTENSITY);
    }

    #[test]
    fn test_negative_input_clamps_to_zero() {
        let mut control = LightControl::new();
        assert_eq!(control.set_from_input("-3.5").unwrap(), 0.0);
        assert_eq!(control.value(), 0.0);
    }

    #[test]
    fn test_direct_set_clamps() {
        let mut control = LightControl::new();
        assert_eq!(control.set(-1.0), 0.0);
        assert_eq!(control.set(0.8), 0.8);
    }
}
