//! Card pool and deck dealing for the memory game.

use crate::Difficulty;
use derive_getters::Getters;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, instrument};

/// A card face from the fixed image pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardFace {
    /// Pair identity shared by both copies of the face.
    pub id: u8,
    /// Remote image URL.
    pub image: &'static str,
}

/// Fixed image pool. Entries 8 and 12 share a URL; they are still distinct pairs.
pub const IMAGE_POOL: [CardFace; 12] = [
    CardFace { id: 1, image: "https://images.unsplash.com/photo-1533450718592-29d45635f0a9" },
    CardFace { id: 2, image: "https://images.unsplash.com/photo-1611915387288-fd8d2f5f928b" },
    CardFace { id: 3, image: "https://images.unsplash.com/photo-1606041008023-472dfb5e530f" },
    CardFace { id: 4, image: "https://images.unsplash.com/photo-1596854273338-cbf078ec7071" },
    CardFace { id: 5, image: "https://images.unsplash.com/photo-1560343090-f0409e92791a" },
    CardFace { id: 6, image: "https://images.unsplash.com/photo-1518791841217-8f162f1e1131" },
    CardFace { id: 7, image: "https://images.unsplash.com/photo-1574158622682-e40e69881006" },
    CardFace { id: 8, image: "https://images.unsplash.com/photo-1543852786-1cf6624b9987" },
    CardFace { id: 9, image: "https://images.unsplash.com/photo-1548767797-d8c844163c4c" },
    CardFace { id: 10, image: "https://images.unsplash.com/photo-1519052537078-e6302a4968d4" },
    CardFace { id: 11, image: "https://images.unsplash.com/photo-1514888286974-6c03e2ca1dba" },
    CardFace { id: 12, image: "https://images.unsplash.com/photo-1543852786-1cf6624b9987" },
];

/// Number of cards on the grid for a tier.
pub fn grid_size(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 8,
        Difficulty::Medium => 12,
        Difficulty::Hard => 18,
    }
}

/// One card instance on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Getters)]
pub struct Card {
    /// Position of this instance in the dealt deck.
    instance_id: usize,
    /// Pair identity; the two instances of a face share it.
    pair_id: u8,
    #[getter(skip)]
    image: &'static str,
}

impl Card {
    /// Image shown when face up.
    pub fn image(&self) -> &'static str {
        self.image
    }
}

/// Deals a shuffled deck of `grid_size(difficulty)` cards.
///
/// The first `grid_size / 2` faces of the pool are doubled, shuffled
/// uniformly and numbered by their final position.
#[instrument(skip(rng))]
pub fn deal_deck<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Vec<Card> {
    let pairs = (grid_size(difficulty) / 2).min(IMAGE_POOL.len());
    let faces = &IMAGE_POOL[..pairs];

    let mut doubled: Vec<CardFace> = faces.iter().chain(faces.iter()).copied().collect();
    doubled.shuffle(rng);

    let deck: Vec<Card> = doubled
        .into_iter()
        .enumerate()
        .map(|(instance_id, face)| Card {
            instance_id,
            pair_id: face.id,
            image: face.image,
        })
        .collect();

    debug!(cards = deck.len(), pairs, "Dealt memory deck");
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    #[test]
    fn test_deck_sizes_per_tier() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(deal_deck(&mut rng, Difficulty::Easy).len(), 8);
        assert_eq!(deal_deck(&mut rng, Difficulty::Medium).len(), 12);
        assert_eq!(deal_deck(&mut rng, Difficulty::Hard).len(), 18);
    }

    #[test]
    fn test_every_pair_appears_twice() {
        let deck = deal_deck(&mut StdRng::seed_from_u64(3), Difficulty::Hard);
        let mut counts: HashMap<u8, usize> = HashMap::new();
        for card in &deck {
            *counts.entry(*card.pair_id()).or_default() += 1;
        }
        assert_eq!(counts.len(), 9);
        assert!(counts.values().all(|&n| n == 2));
        assert!((1..=9).all(|id| counts.contains_key(&id)));
    }

    #[test]
    fn test_instance_ids_follow_position() {
        let deck = deal_deck(&mut StdRng::seed_from_u64(9), Difficulty::Medium);
        for (idx, card) in deck.iter().enumerate() {
            assert_eq!(*card.instance_id(), idx);
        }
    }

    #[test]
    fn test_card_image_matches_its_face() {
        let deck = deal_deck(&mut StdRng::seed_from_u64(5), Difficulty::Easy);
        let first: &Card = &deck[0];
        let image = first.image();
        let face = IMAGE_POOL.iter().find(|f| f.id == *first.pair_id());
        assert_eq!(face.map(|f| f.image), Some(image));
    }

    #[test]
    fn test_seeded_shuffle_is_deterministic() {
        let a = deal_deck(&mut StdRng::seed_from_u64(11), Difficulty::Medium);
        let b = deal_deck(&mut StdRng::seed_from_u64(11), Difficulty::Medium);
        assert_eq!(a, b);
    }

    #[test]
    fn test_pool_keeps_duplicate_image() {
        assert_eq!(IMAGE_POOL[7].image, IMAGE_POOL[11].image);
        assert_ne!(IMAGE_POOL[7].id, IMAGE_POOL[11].id);
    }
}
