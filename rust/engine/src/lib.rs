//! # dealers-choice-engine: Multi-Variant Poker Engine Core
//!
//! A deterministic engine for dealer's-choice home games: stud and draw
//! variants with wild cards, side-pot-aware betting, and per-variant
//! phase orchestration, all reproducible from a shuffle seed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`hand`] - Natural 5-card hand evaluation and strength comparison
//! - [`wild`] - Wild-card determination policies (fixed rank, lowest card,
//!   Follow the Queen)
//! - [`evaluator`] - Best-hand search under wild substitution
//! - [`player`] - Player state, actions, and stack management
//! - [`betting`] - One street's betting round state machine
//! - [`pot`] - Contribution ledger, side pots, and pot awards
//! - [`phase`] - Hand phases and shared per-hand state
//! - [`variants`] - The variant trait and the game roster
//! - [`game`] - Hand orchestration across deal, betting, draw, and showdown
//! - [`record`] - Hand history records and JSONL persistence
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use dealers_choice_engine::cards::{Card, Rank, Suit};
//! use dealers_choice_engine::evaluator::evaluate_hand;
//!
//! // Evaluate a 7-card hand with no wild cards in play
//! let cards = [
//!     Card::new(Suit::Hearts, Rank::Ace),
//!     Card::new(Suit::Hearts, Rank::King),
//!     Card::new(Suit::Hearts, Rank::Queen),
//!     Card::new(Suit::Hearts, Rank::Jack),
//!     Card::new(Suit::Hearts, Rank::Ten),
//!     Card::new(Suit::Clubs, Rank::Two),
//!     Card::new(Suit::Diamonds, Rank::Three),
//! ];
//!
//! let value = evaluate_hand(&cards, None, &[]);
//! println!("Hand category: {:?}", value.category);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! All outcomes are reproducible from the shuffle seed:
//!
//! ```rust
//! use dealers_choice_engine::deck::Deck;
//!
//! // Same seed produces same shuffle
//! let deck1 = Deck::new_with_seed(42);
//! let deck2 = Deck::new_with_seed(42);
//! // deck1 and deck2 will deal identical card order
//! ```
//!
//! ## Running a Hand
//!
//! A [`game::Game`] drives one table through a chosen variant:
//!
//! ```rust
//! use dealers_choice_engine::game::Game;
//! use dealers_choice_engine::variants::{variant_for, BettingKind, VariantId};
//!
//! let variant = variant_for(
//!     VariantId::SevenCardStud,
//!     BettingKind::AnteBringIn { ante: 1, bring_in: 2, small_bet: 4, big_bet: 8 },
//! );
//! let mut game = Game::new(variant, &[200, 200, 200], 0, 42).unwrap();
//! game.start_hand().unwrap();
//! // Third street is dealt; the bring-in has been posted and the
//! // next seat owes an action.
//! assert!(game.next_actor().is_some());
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod phase;
pub mod player;
pub mod pot;
pub mod record;
pub mod variants;
pub mod wild;
