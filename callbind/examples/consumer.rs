//! A polling consumer that hands every poll result to a binding.
//!
//! The consumer owns the event kinds (message, error, end of partition,
//! poll timeout) and their defaults. The application only supplies the
//! callbacks it cares about.
use std::{collections::VecDeque, fmt};

use callbind::{Binding, Event, callbacks};

#[derive(Debug, Clone)]
struct Record {
    partition: i32,
    offset: u64,
    payload: String,
}

#[derive(Debug, Clone)]
struct ConsumerError(String);

impl fmt::Display for ConsumerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "consumer error: {}", self.0)
    }
}

type Flow = Result<bool, ConsumerError>;

fn raise(err: ConsumerError) -> Flow {
    Err(err)
}

fn keep_going() -> Flow {
    Ok(true)
}

/// What a single poll can produce. `Ok(false)` from a handler stops the loop.
#[derive(Event, Debug)]
#[event(output = Flow)]
enum Poll {
    Message(Record),
    #[event(default = raise)]
    Error(ConsumerError),
    #[event(default = |_: i32| Ok(false))]
    PartitionEof(i32),
    #[event(default = keep_going)]
    Timeout,
}

struct Consumer {
    script: VecDeque<Poll>,
}

impl Consumer {
    fn new() -> Self {
        let mut script = VecDeque::new();
        for offset in 0..3 {
            script.push_back(Poll::Message(Record {
                partition: 0,
                offset,
                payload: format!("order-{offset}"),
            }));
        }
        script.push_back(Poll::Timeout);
        script.push_back(Poll::Error(ConsumerError("transient: leader moved".into())));
        script.push_back(Poll::Message(Record {
            partition: 0,
            offset: 3,
            payload: "order-3".into(),
        }));
        script.push_back(Poll::PartitionEof(0));
        Self { script }
    }

    fn poll(&mut self) -> Poll {
        self.script.pop_front().unwrap_or(Poll::PartitionEof(0))
    }

    fn consume(&mut self, binding: &Binding<Poll>) -> Result<(), ConsumerError> {
        loop {
            let event = self.poll();
            tracing::debug!(event = %event.name(), "polled");
            if !binding.dispatch(event)? {
                return Ok(());
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let binding = callbind::bind::<Poll, _>(callbacks![
        |record: Record| -> Flow {
            println!(
                "[p{} @{}] {}",
                record.partition, record.offset, record.payload
            );
            Ok(true)
        },
        |err: ConsumerError| -> Flow {
            eprintln!("{err}, retrying");
            Ok(true)
        },
    ])?;

    print!("{}", binding.report());

    let mut consumer = Consumer::new();
    consumer.consume(&binding).map_err(|e| e.to_string())?;
    Ok(())
}
