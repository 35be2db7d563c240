//! Deterministic demo-account generation using curated word lists.
//!
//! Produces forum-style handles, matching emails and throwaway secrets
//! so a run can be exercised without uploaded account data.
//! All generation is deterministic (same RNG seed = same accounts).

use crate::{
    registry::AccountRow,
    rng::{ActivityRng, RngBank, StreamSlot},
    types::Seed,
};

const SECRET_ALPHABET: &[u8] = b"abcdefghijkmnpqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const SECRET_LEN: usize = 12;

const ADJECTIVES: &[&str] = &[
    "quiet", "rusty", "lucky", "brisk", "sleepy", "clever", "mellow", "stormy",
    "golden", "silent", "wild", "fuzzy", "gentle", "nimble", "cosmic", "salty",
    "velvet", "frosty", "hidden", "bold", "tidy", "wandering", "sunny", "crimson",
];

const NOUNS: &[&str] = &[
    "fox", "otter", "falcon", "badger", "heron", "comet", "maple", "river",
    "lantern", "pixel", "cactus", "walrus", "sparrow", "harbor", "glacier", "cobalt",
    "thistle", "raven", "pebble", "meadow", "ember", "tiger", "willow", "quokka",
];

const MAIL_DOMAINS: &[&str] = &[
    "example.com", "example.net", "example.org", "mail.test", "inbox.test",
];

const SITES: &[&str] = &[
    "forum.example.com", "community.example.net", "boards.example.org",
    "talk.example.com", "discuss.example.net",
];

pub struct HandleGenerator;

impl HandleGenerator {
    /// Generate `n` demo rows from a dedicated stream of `seed`.
    pub fn demo_rows(seed: Seed, n: usize) -> Vec<AccountRow> {
        let mut rng = RngBank::new(seed).for_slot(StreamSlot::Handles);
        (0..n).map(|_| Self::generate_row(&mut rng)).collect()
    }

    pub fn generate_row(rng: &mut ActivityRng) -> AccountRow {
        let handle = Self::generate_handle(rng);
        let domain = pick(rng, MAIL_DOMAINS);
        let site = pick(rng, SITES);
        let secret = Self::generate_secret(rng);
        AccountRow::new(&handle, &format!("{handle}@{domain}"), &secret, site)
    }

    /// e.g. "quiet_otter42"
    pub fn generate_handle(rng: &mut ActivityRng) -> String {
        let adjective = pick(rng, ADJECTIVES);
        let noun = pick(rng, NOUNS);
        let suffix = rng.next_u64_below(100);
        format!("{adjective}_{noun}{suffix:02}")
    }

    pub fn generate_secret(rng: &mut ActivityRng) -> String {
        (0..SECRET_LEN)
            .map(|_| {
                let idx = rng.next_u64_below(SECRET_ALPHABET.len() as u64) as usize;
                SECRET_ALPHABET[idx] as char
            })
            .collect()
    }
}

fn pick(rng: &mut ActivityRng, items: &[&'static str]) -> &'static str {
    items[rng.next_u64_below(items.len() as u64) as usize]
}
