//! Round-trip tests over randomly generated race days.
//!
//! Streams are built from row-overs and ordinary bumps only, so the
//! encoder's spelling is unique and decode → encode must reproduce the
//! text byte for byte.

use bumps_core::{
    config::ConvertConfig,
    decoder::{self, DecodeOptions},
    encoder,
    flat,
    notation,
    token,
};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

// ── Helpers ──────────────────────────────────────────────────────────────────

struct Generated {
    divisions: Vec<Vec<String>>,
    days:      usize,
    results:   String,
}

/// A random field of 1-4 divisions over 1-5 days.
fn generate(seed: u64) -> Generated {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);

    let num_divisions = rng.gen_range(1..=4);
    let days = rng.gen_range(1..=5);

    let mut next_club = 0;
    let divisions: Vec<Vec<String>> = (0..num_divisions)
        .map(|_| {
            let size = rng.gen_range(2..=6);
            (0..size)
                .map(|_| {
                    next_club += 1;
                    format!("Club{next_club} 1")
                })
                .collect()
        })
        .collect();

    let mut results = String::new();
    for _ in 0..days {
        let mut line = Vec::with_capacity(num_divisions);
        for division in (0..num_divisions).rev() {
            // Every division above the bottom one also races its sandwich crew.
            let mut remaining = divisions[division].len();
            if division + 1 < num_divisions {
                remaining += 1;
            }

            let mut tokens = String::new();
            while remaining > 0 {
                if remaining >= 2 && rng.gen_bool(0.4) {
                    tokens.push('u');
                    remaining -= 2;
                } else {
                    tokens.push('r');
                    remaining -= 1;
                }
            }
            line.push(tokens);
        }
        results.push_str(&line.join(" "));
        results.push('\n');
    }

    Generated { divisions, days, results }
}

fn notation_doc(generated: &Generated) -> String {
    let mut doc = String::from("Set,Town Bumps\nShort,Town\nGender,M\nYear,2020\n");
    doc.push_str(&format!("Days,{}\n\n", generated.days));
    for names in &generated.divisions {
        doc.push_str(&format!("Division,{}\n", names.join(",")));
    }
    doc.push_str("\nResults\n");
    doc.push_str(&generated.results);
    doc
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn decode_then_encode_reproduces_the_text() {
    for seed in 0..200 {
        let generated = generate(seed);
        let tokens = token::tokenize(&generated.results).unwrap();
        let decoded = decoder::decode(
            &tokens,
            generated.days,
            &generated.divisions,
            DecodeOptions::default(),
        )
        .unwrap_or_else(|e| panic!("seed {seed}: {e}\n{}", generated.results));

        let encoded = encoder::encode(&decoded.moves);
        assert_eq!(encoded, generated.results, "seed {seed}");

        let again = decoder::decode(
            &token::tokenize(&encoded).unwrap(),
            generated.days,
            &generated.divisions,
            DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(again.moves, decoded.moves, "seed {seed}");
    }
}

#[test]
fn generated_days_conserve_movement() {
    for seed in 0..200 {
        let generated = generate(seed);
        let tokens = token::tokenize(&generated.results).unwrap();
        let decoded = decoder::decode(
            &tokens,
            generated.days,
            &generated.divisions,
            DecodeOptions::default(),
        )
        .unwrap();

        for day in 0..generated.days {
            assert_eq!(decoded.moves.day_total(day), 0, "seed {seed} day {day}");
        }
    }
}

/// Notation → rows → rebuilt event keeps the movements and finishing order.
#[test]
fn notation_survives_the_tabular_form() {
    let _ = env_logger::builder().is_test(true).try_init();

    for seed in 0..50 {
        let generated = generate(seed);
        let event = notation::read_notation(&notation_doc(&generated), DecodeOptions::default())
            .unwrap_or_else(|e| panic!("seed {seed}: {e}"));

        let mut rows = Vec::new();
        flat::write_flat(&mut rows, std::slice::from_ref(&event)).unwrap();
        let rebuilt = flat::read_flat(rows.as_slice(), &ConvertConfig::default())
            .unwrap()
            .remove(0);

        assert_eq!(rebuilt.divisions, event.divisions, "seed {seed}");
        assert_eq!(rebuilt.moves, event.moves, "seed {seed}");
        assert_eq!(rebuilt.finish, event.finish, "seed {seed}");
        assert_eq!(rebuilt.results, generated.results, "seed {seed}");
    }
}
