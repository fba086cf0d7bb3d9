// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release --example eval_all5
// ...
// Total hands      2598960
// Hand classes     7462
// No Pair:         1302540
// One Pair:        1098240
// Two Pair:        123552
// Three of a Kind: 54912
// Straight:        10200
// Flush:           5108
// Full House:      3744
// Four of a Kind:  624
// Straight Flush:  40
// ```

use ahash::HashSet;
use anyhow::Result;
use log::info;
use std::time::Instant;

use deckhand_eval::*;

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let deck = CardList::deck(DeckType::Standard);
    let mut combiner = Combiner::new(&deck, 5)?;

    let now = Instant::now();
    let mut counts = [0u64; 9];
    let mut classes = HashSet::default();
    let mut best: Option<(HandValue, CardList)> = None;

    while let Some(hand) = combiner.next_hand() {
        let value = HandValue::eval5(hand.as_slice())?;
        counts[value.rank() as usize] += 1;
        classes.insert(value.class());

        if best.as_ref().is_none_or(|(v, _)| value > *v) {
            best = Some((value, hand.clone()));
        }
    }

    let elapsed = now.elapsed().as_secs_f64();
    let total = counts.iter().sum::<u64>();
    info!("Total hands      {total}");
    info!("Hand classes     {}", classes.len());
    info!("Elapsed:         {elapsed:.3}s");
    info!("Hands/sec:       {:.0}", total as f64 / elapsed);

    for rank in HandRank::ALL {
        info!("{:<17}{}", format!("{rank}:"), counts[rank as usize]);
    }

    if let Some((_, hand)) = best {
        let info = HandInfo::new(hand.as_slice())?;
        info!("First best hand  {hand} {info}");
    }

    // Deal a random hand.
    let mut rng = Prng::from_entropy();
    let mut deck = deck;
    deck.shuffle_with(&mut rng)?;
    let mut hand = CardList::new(5);
    for _ in 0..5 {
        hand.append(deck.pop()?)?;
    }

    let info = HandInfo::new(hand.as_slice())?;
    info!("Random hand      {hand} {info} ({})", info.value().class());

    Ok(())
}
