//! ---
//! ww_section: "02-sizing-compliance"
//! ww_subsection: "module"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "Protective breaker rating selection."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

/// IEC miniature/moulded-case breaker frame sizes stocked in the field.
pub const STANDARD_RATINGS_A: [u32; 16] = [
    6, 10, 16, 20, 25, 32, 40, 50, 63, 80, 100, 125, 160, 200, 250, 400,
];

/// Safety margin applied on top of the computed branch current.
pub const SAFETY_MARGIN: f64 = 1.2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreakerRating {
    pub rating_a: u32,
    /// False when even the 400 A frame is too small; `rating_a` then carries
    /// the unclamped margined value and the caller must surface a warning.
    pub standard: bool,
}

/// Smallest standard rating at or above `current_a` with a 20 % margin.
pub fn select_breaker(current_a: f64) -> BreakerRating {
    let raw = (current_a * SAFETY_MARGIN).ceil() as u32;
    match STANDARD_RATINGS_A.iter().find(|rating| **rating >= raw) {
        Some(rating) => BreakerRating {
            rating_a: *rating,
            standard: true,
        },
        None => BreakerRating {
            rating_a: raw,
            standard: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_up_into_the_standard_sequence() {
        assert_eq!(select_breaker(8.91).rating_a, 16);
        assert_eq!(select_breaker(40.0).rating_a, 50);
        assert_eq!(select_breaker(4.0).rating_a, 6);
    }

    #[test]
    fn margined_value_exactly_on_a_frame_keeps_that_frame() {
        // 20 A load, margin 24 A, next frame is 25 A.
        assert_eq!(select_breaker(20.0).rating_a, 25);
        // 5 A load margins to exactly the 6 A frame.
        let rating = select_breaker(5.0);
        assert_eq!(rating.rating_a, 6);
        assert!(rating.standard);
    }

    #[test]
    fn oversized_load_reports_the_raw_margined_value() {
        let rating = select_breaker(400.0);
        assert!(!rating.standard);
        assert_eq!(rating.rating_a, 480);
        assert!(rating.rating_a > *STANDARD_RATINGS_A.last().unwrap());
    }

    #[test]
    fn every_standard_result_is_a_member_of_the_sequence() {
        for amps in 1..400 {
            let rating = select_breaker(f64::from(amps));
            if rating.standard {
                assert!(STANDARD_RATINGS_A.contains(&rating.rating_a));
            }
        }
    }
}
