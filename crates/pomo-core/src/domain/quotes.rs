use rand::seq::SliceRandom;
use rand::Rng;

pub const MOTIVATIONAL_QUOTES: [&str; 15] = [
    "You are capable of amazing things",
    "Every small step leads to big achievements",
    "Focus is your superpower",
    "You're doing great, keep going",
    "Productivity is progress, not perfection",
    "Your future self will thank you",
    "Stay focused, stay fabulous",
    "You've got this, champion",
    "Dream big, work focused",
    "Success starts with a single focused moment",
    "You are unstoppable when you focus",
    "Make today amazing with focused work",
    "Your dedication is inspiring",
    "Focus today, celebrate tomorrow",
    "You're building something beautiful",
];

/// Holds the message currently on display. Each rotation draws uniformly
/// from the whole list, so the same quote may come up twice in a row.
#[derive(Debug, Clone)]
pub struct QuoteRotator {
    quotes: &'static [&'static str],
    current: &'static str,
}

impl QuoteRotator {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_quotes(&MOTIVATIONAL_QUOTES, rng)
    }

    pub fn with_quotes<R: Rng + ?Sized>(quotes: &'static [&'static str], rng: &mut R) -> Self {
        let current = quotes.choose(rng).copied().unwrap_or_default();
        Self { quotes, current }
    }

    pub fn rotate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &'static str {
        if let Some(quote) = self.quotes.choose(rng) {
            self.current = *quote;
        }
        self.current
    }

    pub fn current(&self) -> &'static str {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn initial_quote_comes_from_list() {
        let mut rng = StdRng::seed_from_u64(7);
        let rotator = QuoteRotator::new(&mut rng);

        assert!(MOTIVATIONAL_QUOTES.contains(&rotator.current()));
    }

    #[test]
    fn rotation_eventually_covers_every_quote() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut rotator = QuoteRotator::new(&mut rng);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..2000 {
            seen.insert(rotator.rotate(&mut rng));
        }

        assert_eq!(seen.len(), MOTIVATIONAL_QUOTES.len());
    }

    #[test]
    fn empty_list_yields_empty_quote() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut rotator = QuoteRotator::with_quotes(&[], &mut rng);

        assert_eq!(rotator.rotate(&mut rng), "");
    }
}
