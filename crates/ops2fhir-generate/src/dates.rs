//! Synthetic timestamps for resources whose source rows carry no dates.

use ops2fhir_model::FhirDateTime;
use rand::Rng;

/// A uniform random instant between 1915 and 2019, at midday CET.
///
/// Days are capped at 27 so every month/year combination is a valid date.
pub fn random_datetime<R: Rng + ?Sized>(rng: &mut R) -> FhirDateTime {
    let year: u32 = rng.gen_range(1915..=2019);
    let month: u32 = rng.gen_range(1..=12);
    let day: u32 = rng.gen_range(1..=27);
    FhirDateTime::new(format!("{year:04}-{month:02}-{day:02}T12:00:00+01:00"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_datetime_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let instant = random_datetime(&mut rng);
            let text = instant.as_str();
            let year: u32 = text[0..4].parse().unwrap();
            let month: u32 = text[5..7].parse().unwrap();
            let day: u32 = text[8..10].parse().unwrap();
            assert!((1915..=2019).contains(&year));
            assert!((1..=12).contains(&month));
            assert!((1..=27).contains(&day));
            assert!(text.ends_with("T12:00:00+01:00"));
        }
    }
}
