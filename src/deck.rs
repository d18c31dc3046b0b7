use crate::log::{log_debug, log_info};
use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

/// Topic name to descriptive text, in document order.
pub type TopicMap = IndexMap<String, String>;

/// The remote card dataset. Card and topic ordering is preserved exactly
/// as it appears in the JSON document; the deck is immutable for the
/// lifetime of a session.
#[derive(Debug, Clone, Deserialize)]
pub struct Deck {
    cards: IndexMap<String, TopicMap>,
}

/// One drawn card, borrowed from the deck it came from.
#[derive(Debug)]
pub struct Card<'a> {
    pub name: &'a str,
    pub topics: &'a TopicMap,
}

impl Deck {
    /// One blocking GET against the dataset endpoint. No retry and no
    /// offline fallback; failures propagate and end the session.
    pub fn fetch(url: &str) -> Result<Self> {
        log_info(&format!("Fetching card dataset from: {}", url));

        let response = reqwest::blocking::get(url)
            .with_context(|| format!("Failed to fetch card dataset from {}", url))?;

        anyhow::ensure!(
            response.status().is_success(),
            "Card dataset request failed with status {}",
            response.status()
        );

        let deck: Deck = response.json().context("Failed to parse card dataset")?;
        log_info(&format!("Loaded {} cards", deck.len()));
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffles the card order with `rng` and picks the card at
    /// `selector - 1` of the shuffled order. `selector` is 1-based and
    /// must be in `[1, len]`.
    pub fn draw<G: Rng + ?Sized>(&self, selector: usize, rng: &mut G) -> Result<Card<'_>> {
        anyhow::ensure!(
            selector >= 1 && selector <= self.cards.len(),
            "Card selector {} out of range (1 to {})",
            selector,
            self.cards.len()
        );

        let mut order: Vec<usize> = (0..self.cards.len()).collect();
        order.shuffle(rng);

        let index = order[selector - 1];
        let (name, topics) = self
            .cards
            .get_index(index)
            .ok_or_else(|| anyhow!("Card index {} out of range", index))?;

        log_debug(&format!("Drew card '{}' with selector {}", name, selector));
        Ok(Card { name, topics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_deck() -> Deck {
        serde_json::from_str(
            r#"{
                "cards": {
                    "the fool": {"love": "a leap", "career": "a start", "health": "vigour"},
                    "the magician": {"love": "willpower", "career": "craft", "health": "balance"},
                    "the high priestess": {"love": "intuition", "career": "patience", "health": "rest"},
                    "the empress": {"love": "abundance", "career": "growth", "health": "comfort"}
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn topics_keep_document_order() {
        let deck = sample_deck();
        let card = deck.draw(1, &mut StdRng::seed_from_u64(1)).unwrap();
        let topics: Vec<&str> = card.topics.keys().map(String::as_str).collect();
        assert_eq!(topics, ["love", "career", "health"]);
    }

    #[test]
    fn selector_one_returns_first_shuffled_key() {
        let deck = sample_deck();

        // Replay the same shuffle the draw performs.
        let mut order: Vec<usize> = (0..deck.len()).collect();
        order.shuffle(&mut StdRng::seed_from_u64(42));
        let expected = deck.cards.get_index(order[0]).unwrap().0.clone();

        let card = deck.draw(1, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(card.name, expected);
    }

    #[test]
    fn same_seed_and_selector_draw_the_same_card() {
        let deck = sample_deck();
        let first = deck.draw(3, &mut StdRng::seed_from_u64(9)).unwrap().name.to_string();
        let second = deck.draw(3, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(first, second.name);
    }

    #[test]
    fn distinct_selectors_draw_distinct_cards() {
        let deck = sample_deck();
        let first = deck.draw(1, &mut StdRng::seed_from_u64(9)).unwrap().name.to_string();
        let second = deck.draw(2, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_ne!(first, second.name);
    }

    #[test]
    fn out_of_range_selectors_are_rejected() {
        let deck = sample_deck();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(deck.draw(0, &mut rng).is_err());
        assert!(deck.draw(deck.len() + 1, &mut rng).is_err());
    }
}
