//! Sample library data: magazines, authors, and editions.
//!
//! In a real application these records would be materialized from the
//! host's database; the demo keeps them in memory.

use tomselect_rs_query::{MemorySource, Record};

/// Three magazines.
pub fn magazines() -> MemorySource {
    MemorySource::new(vec![
        Record::new().with("id", 1_i64).with("name", "Art Quarterly"),
        Record::new().with("id", 2_i64).with("name", "Science Monthly"),
        Record::new().with("id", 3_i64).with("name", "History Review"),
    ])
}

/// A handful of authors; creation is enabled so the widget can add one.
pub fn authors() -> MemorySource {
    MemorySource::new(vec![
        Record::new().with("id", 1_i64).with("name", "Ada Lovelace"),
        Record::new().with("id", 2_i64).with("name", "Tim Martin"),
        Record::new().with("id", 3_i64).with("name", "Grace Hopper"),
        Record::new().with("id", 4_i64).with("name", "Alan Turing"),
    ])
    .with_create("id", "name")
}

/// Thirty editions spread across the magazines.
pub fn editions() -> MemorySource {
    let names = [
        "Art of the Possible",
        "Modern Art Today",
        "The Art Issue",
        "Deep Fields",
        "Quiet Machines",
        "Martial Arts Special",
        "Spring Catalogue",
        "Summer Catalogue",
        "Autumn Catalogue",
        "Winter Catalogue",
    ];
    MemorySource::new(
        (0..30_i64)
            .map(|i| {
                Record::new()
                    .with("id", i + 1)
                    .with("name", format!("{} #{}", names[(i % 10) as usize], i / 10 + 1))
                    .with("magazine_id", (i % 3) + 1)
                    .with("year", 2020 + i % 5)
                    .with("primary_author_id", (i % 4) + 1)
            })
            .collect(),
    )
}
