use rand::seq::SliceRandom;
use rand::Rng;

/// Static reference data for a tradable instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instrument {
    pub name: &'static str,
    pub symbol: &'static str,
}

/// Number of positions a fresh portfolio is seeded with.
pub const SEED_COUNT: usize = 5;

/// The fixed instrument catalog. The form only accepts entries from this
/// list, and startup seeding draws from it.
pub const CATALOG: [Instrument; 8] = [
    Instrument {
        name: "Amazon",
        symbol: "AMZN",
    },
    Instrument {
        name: "Apple",
        symbol: "AAPL",
    },
    Instrument {
        name: "Tesla",
        symbol: "TSLA",
    },
    Instrument {
        name: "Microsoft",
        symbol: "MSFT",
    },
    Instrument {
        name: "Google",
        symbol: "GOOGL",
    },
    Instrument {
        name: "Nike",
        symbol: "NKE",
    },
    Instrument {
        name: "Disney",
        symbol: "DIS",
    },
    Instrument {
        name: "NVIDIA",
        symbol: "NVDA",
    },
];

pub fn find_by_name(name: &str) -> Option<&'static Instrument> {
    CATALOG.iter().find(|instrument| instrument.name == name)
}

/// Draw `count` distinct instruments in random order. The randomness source
/// is injected so seeding stays reproducible under test.
pub fn random_selection<R: Rng>(rng: &mut R, count: usize) -> Vec<&'static Instrument> {
    let mut instruments: Vec<_> = CATALOG.iter().collect();
    instruments.shuffle(rng);
    instruments.truncate(count.min(CATALOG.len()));

    instruments
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn catalog_has_unique_names_and_symbols() {
        let names: HashSet<_> = CATALOG.iter().map(|instrument| instrument.name).collect();
        let symbols: HashSet<_> = CATALOG.iter().map(|instrument| instrument.symbol).collect();

        assert_eq!(names.len(), CATALOG.len());
        assert_eq!(symbols.len(), CATALOG.len());
    }

    #[test]
    fn find_by_name_matches_catalog_entries() {
        let amazon = find_by_name("Amazon").unwrap();

        assert_eq!(amazon.symbol, "AMZN");
        assert!(find_by_name("Enron").is_none());
    }

    #[test]
    fn random_selection_is_reproducible_for_a_fixed_seed() {
        let first = random_selection(&mut StdRng::seed_from_u64(7), SEED_COUNT);
        let second = random_selection(&mut StdRng::seed_from_u64(7), SEED_COUNT);

        assert_eq!(first, second);
        assert_eq!(first.len(), SEED_COUNT);
    }

    #[test]
    fn random_selection_never_repeats_an_instrument() {
        let selection = random_selection(&mut StdRng::seed_from_u64(42), SEED_COUNT);
        let names: HashSet<_> = selection.iter().map(|instrument| instrument.name).collect();

        assert_eq!(names.len(), selection.len());
    }

    #[test]
    fn random_selection_is_clamped_to_catalog_size() {
        let selection = random_selection(&mut StdRng::seed_from_u64(0), 100);

        assert_eq!(selection.len(), CATALOG.len());
    }
}
