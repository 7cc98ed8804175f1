use crate::validation::ValidationError;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// Ratings are on a 0-5 scale, inclusive. 0 means "not rated yet".
pub fn validate_rating(rating: f64) -> Result<(), ValidationError> {
    if rating.is_nan() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::InvalidRating(rating));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_inclusive() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(5.0).is_ok());
        assert!(validate_rating(3.5).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        assert!(validate_rating(-0.5).is_err());
        assert!(validate_rating(5.1).is_err());
        assert!(validate_rating(f64::NAN).is_err());
    }
}
