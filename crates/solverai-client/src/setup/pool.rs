use crossbeam::channel;

/// Worker count used when the caller does not bound a bulk deletion.
pub(crate) fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get() + 4)
        .unwrap_or(8)
        .min(32)
}

/// Run `task` over `items` on at most `max_workers` threads (one per item when unset).
///
/// Blocks until every item is processed. The output holds one entry per item, in input
/// order, whatever order the workers finished in.
pub(crate) fn run_indexed<T, R, F>(items: Vec<T>, max_workers: Option<usize>, task: F) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(usize, T) -> R + Sync,
{
    let total = items.len();
    if total == 0 {
        return Vec::new();
    }
    let workers = max_workers.unwrap_or(total).clamp(1, total);

    let (job_sender, job_receiver) = channel::unbounded::<(usize, T)>();
    let (done_sender, done_receiver) = channel::unbounded::<(usize, R)>();
    for job in items.into_iter().enumerate() {
        job_sender
            .send(job)
            .expect("Job receiver should be alive while jobs are queued");
    }
    drop(job_sender);

    std::thread::scope(|scope| {
        for _ in 0..workers {
            let job_receiver = job_receiver.clone();
            let done_sender = done_sender.clone();
            let task = &task;
            scope.spawn(move || {
                for (index, item) in job_receiver.iter() {
                    if done_sender.send((index, task(index, item))).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(done_sender);

    let mut slots: Vec<Option<R>> = (0..total).map(|_| None).collect();
    for (index, output) in done_receiver.try_iter() {
        slots[index] = Some(output);
    }
    slots.into_iter().flatten().collect()
}
