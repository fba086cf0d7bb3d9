// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// ```bash
// $ cargo r --release --features=parallel --example par_eval_all7
// ...
// Total hands      133784560
// No Pair:         23294460
// One Pair:        58627800
// Two Pair:        31433400
// Three of a Kind: 6461620
// Straight:        6180020
// Flush:           4047644
// Full House:      3473184
// Four of a Kind:  224848
// Straight Flush:  41584
// ```

use anyhow::Result;
use log::info;
use std::{
    sync::atomic::{AtomicU64, Ordering},
    thread,
    time::Instant,
};

use deckhand_eval::*;

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    const NUM_RANKS: usize = 9;
    let num_tasks = thread::available_parallelism()?.get();

    // Create per task counters to avoid contention.
    let task_counters = (0..num_tasks)
        .map(|_| {
            (0..NUM_RANKS)
                .map(|_| AtomicU64::new(0))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let now = Instant::now();

    CardList::deck(DeckType::Standard).par_for_each(num_tasks, 7, |task_id, hand| {
        if let Ok(value) = HandValue::eval(hand.as_slice()) {
            let counters = &task_counters[task_id];
            counters[value.rank() as usize].fetch_add(1, Ordering::Relaxed);
        }
    })?;

    let elapsed = now.elapsed().as_secs_f64();

    // Aggregate counters.
    let agg = (0..NUM_RANKS)
        .map(|r| {
            task_counters
                .iter()
                .map(|counts| counts[r].load(Ordering::Relaxed))
                .sum()
        })
        .collect::<Vec<u64>>();

    let total = agg.iter().sum::<u64>();
    info!("Total hands      {total}");
    info!("Tasks:           {num_tasks}");
    info!("Elapsed:         {elapsed:.3}s");
    info!("Hands/sec:       {:.0}", total as f64 / elapsed);

    for rank in HandRank::ALL {
        info!("{:<17}{}", format!("{rank}:"), agg[rank as usize]);
    }

    Ok(())
}
