use std::sync::Arc;
use std::time::Duration;

use floodgauge::{
    Controller,
    pool::{StaticQueue, SwitchDelivery},
    report::{Reporter, StdoutReporter},
};

/// Drains an in-memory backlog through a pool of worker tasks and lets the
/// controller measure the throughput. The workers play the role the message
/// listener plays in a real deployment: do the unit of work, then report it.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    const TOTAL: u64 = 10_000;

    let queue = Arc::new(StaticQueue::new(TOTAL));
    let delivery = Arc::new(SwitchDelivery::new());
    let controller = Arc::new(
        Controller::builder()
            .queue(Arc::clone(&queue))
            .delivery(Arc::clone(&delivery))
            .build(),
    );

    let backlog = controller.start(TOTAL).unwrap();
    println!("backlog at start: {backlog}");

    let workers: Vec<_> = (0..num_cpus::get())
        .map(|_| {
            let queue = Arc::clone(&queue);
            let delivery = Arc::clone(&delivery);
            let controller = Arc::clone(&controller);
            tokio::spawn(async move {
                // The controller flips the switch off when the run finishes,
                // which is also our signal to drain out.
                while delivery.is_enabled() {
                    if queue.take_one() {
                        // pretend the unit takes a moment of real work
                        tokio::time::sleep(Duration::from_millis(1)).await;
                        controller.record_completion();
                    } else {
                        tokio::task::yield_now().await;
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        worker.await.unwrap();
    }

    let stats = controller.stats().unwrap();
    StdoutReporter.report(stats).await.unwrap();
}
