//! Playing cards and map positions as runtime-defined records.
//!
//! The deck is the cartesian product of [`SUITS`] and [`RANKS`] with the suit
//! varying slowest, so it starts at `Card(rank=2, suit=♣)` and ends at
//! `Card(rank=A, suit=♠)`.

use log::debug;
use rekord_core::RecordResult;
use rekord_registry::{FieldSpec, RecordInstance, RecordShape, Registry, RegistryBuilder};

/// Card ranks, lowest first.
pub const RANKS: [&str; 13] = [
    "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K", "A",
];

/// Card suits in deck order.
pub const SUITS: [&str; 4] = ["♣", "♢", "♡", "♠"];

/// The two-field card shape.
pub fn card_shape() -> RecordResult<RecordShape> {
    RecordShape::define(
        "Card",
        [
            FieldSpec::new("rank").with_type("str"),
            FieldSpec::new("suit").with_type("str"),
        ],
    )
}

/// One card per (suit, rank) pair, suit varying slowest.
pub fn make_french_deck(card: &RecordShape) -> RecordResult<Vec<RecordInstance<'_>>> {
    let deck = SUITS
        .iter()
        .flat_map(|suit| RANKS.iter().map(move |rank| (*rank, *suit)))
        .map(|(rank, suit)| card.positional(vec![rank.into(), suit.into()]))
        .collect::<RecordResult<Vec<_>>>()?;
    debug!("built deck of {} {} records", deck.len(), card.name());
    Ok(deck)
}

/// Registry holding both `Position` definitions; the second one shadows the first.
///
/// The first has defaults and a `unit` annotation on both coordinates. The
/// second is built from a bare name list, so every field is required and
/// `lat` comes before `lon`.
pub fn position_registry() -> RecordResult<Registry> {
    let mut builder = RegistryBuilder::new();
    builder
        .add_shape("Position")
        .field(FieldSpec::new("name").with_type("str"))
        .field(FieldSpec::new("lon").with_type("float").with_default(0.0))
        .field(FieldSpec::new("lat").with_type("float").with_default(0.0))
        .add_metadata("lon", "unit", "degrees")
        .add_metadata("lat", "unit", "degrees")
        .done()?;
    builder.insert(RecordShape::from_field_names("Position", &["name", "lat", "lon"])?);
    Ok(builder.build())
}

/// Render a list of records the way a list of values is rendered.
pub fn render_all(records: &[RecordInstance<'_>]) -> String {
    let rendered: Vec<String> = records.iter().map(ToString::to_string).collect();
    format!("[{}]", rendered.join(", "))
}
