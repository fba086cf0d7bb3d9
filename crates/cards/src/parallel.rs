// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel hand iteration.
use log::debug;
use std::thread;

use crate::{CardList, Combiner, Prng, Result};

impl CardList {
    /// Parallel for each, calls the `f` closure for each k-cards hand from
    /// this deck.
    ///
    /// The closure takes an usize that is the task identifier (0..num_tasks)
    /// and the hand. Each task goes through a contiguous range of hands in
    /// enumeration order.
    ///
    /// Panics if `num_tasks` is zero.
    pub fn par_for_each<F>(&self, num_tasks: usize, k: usize, f: F) -> Result<()>
    where
        F: Fn(usize, &CardList) + Send + Sync,
    {
        assert!(num_tasks > 0, "num_tasks must be positive");

        let combiner = Combiner::new(self, k)?;
        let total = combiner.total();
        let hands_per_task = total.div_ceil(num_tasks as u64);

        debug!("Enumerating {total} hands of {k} cards with {num_tasks} tasks");

        thread::scope(|s| {
            for task_id in 0..num_tasks {
                let start = task_id as u64 * hands_per_task;
                if start >= total {
                    break;
                }

                let mut combiner = combiner.clone();
                let f = &f;
                s.spawn(move || {
                    combiner.seek(start).expect("start rank in range");

                    for _ in 0..hands_per_task {
                        match combiner.next_hand() {
                            Some(hand) => f(task_id, hand),
                            None => break,
                        }
                    }
                });
            }
        });

        Ok(())
    }

    /// Calls the given closure from `num_tasks` parallel tasks generating
    /// `samples_per_task` uniform samples of size k.
    ///
    /// Each task draws from its own generator seeded from system entropy.
    ///
    /// Panics if `num_tasks` is zero.
    pub fn par_sample<F>(&self, num_tasks: usize, samples_per_task: u64, k: usize, f: F) -> Result<()>
    where
        F: Fn(usize, &CardList) + Send + Sync,
    {
        assert!(num_tasks > 0, "num_tasks must be positive");

        let combiner = Combiner::new(self, k)?;

        debug!("Sampling {samples_per_task} hands of {k} cards with {num_tasks} tasks");

        thread::scope(|s| {
            for task_id in 0..num_tasks {
                let mut combiner = combiner.clone();
                let f = &f;
                s.spawn(move || {
                    let mut rng = Prng::from_entropy();
                    combiner.sample(samples_per_task, &mut rng, |hand| f(task_id, hand));
                });
            }
        });

        Ok(())
    }
}
