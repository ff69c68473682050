//! End-to-end binding scenarios for a consumer-style event source.

use std::{
    io,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use callbind::{Callback, Config, Dispatcher, Error, Event, Signature, Source, callbacks};

#[derive(Debug, Clone, PartialEq)]
struct Message {
    offset: u64,
    payload: String,
}

#[derive(Debug, Clone, PartialEq)]
struct ConsumerError(String);

type Outcome = Result<(), ConsumerError>;

#[derive(Event, Debug)]
#[event(output = Outcome)]
enum OnPoll {
    Message(Message),
    #[event(default = Err::<(), ConsumerError>)]
    Error(ConsumerError),
}

#[derive(Event, Debug)]
#[event(output = Outcome)]
enum OnStream {
    Message(Message),
    Eof,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a thread-local subscriber and returns everything it logged.
fn capture_logs(f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn message(offset: u64) -> Message {
    Message {
        offset,
        payload: format!("m{offset}"),
    }
}

#[test]
fn test_message_and_error_callbacks_bind_to_their_kinds() {
    init_tracing();
    let handled = Arc::new(AtomicUsize::new(0));
    let h = handled.clone();

    let f = move |m: Message| -> Outcome {
        h.fetch_add(m.offset as usize, Ordering::SeqCst);
        Ok(())
    };
    let g = |_: ConsumerError| -> Outcome { Ok(()) };

    let binding = callbind::bind::<OnPoll, _>(vec![
        Callback::new(f).named("f"),
        Callback::new(g).named("g"),
    ])
    .unwrap();

    assert_eq!(binding.get("Message").map(|b| b.callback().name()), Some("f"));
    assert_eq!(binding.get("Error").map(|b| b.callback().name()), Some("g"));

    binding.dispatch(OnPoll::Message(message(5))).unwrap();
    binding
        .dispatch(OnPoll::Error(ConsumerError("swallowed".into())))
        .unwrap();
    assert_eq!(handled.load(Ordering::SeqCst), 5);
}

#[test]
fn test_error_falls_back_to_raising_default() {
    init_tracing();
    let binding =
        callbind::bind::<OnPoll, _>(callbacks![|m: Message| -> Outcome {
            assert!(!m.payload.is_empty());
            Ok(())
        }])
        .unwrap();

    assert_eq!(binding.get("Error").map(|b| b.source()), Some(Source::Default));
    assert_eq!(
        binding.dispatch(OnPoll::Error(ConsumerError("broker down".into()))),
        Err(ConsumerError("broker down".into()))
    );
}

#[test]
fn test_string_callback_matches_nothing() {
    init_tracing();
    let err = callbind::bind::<OnPoll, _>(vec![
        Callback::new(|_: String| -> Outcome { Ok(()) }).named("h"),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        Error::UnmatchedCallback {
            position: 0,
            callback: Arc::from("h"),
            signature: Signature::of::<(String,)>(),
        }
    );
}

#[test]
fn test_required_eof_without_void_callback() {
    init_tracing();
    let err = callbind::bind::<OnStream, _>(callbacks![|_: Message| -> Outcome { Ok(()) }])
        .unwrap_err();
    assert_eq!(
        err,
        Error::MissingRequiredHandler {
            kind: "Eof",
            signature: Signature::of::<()>(),
        }
    );
}

#[test]
fn test_bind_twice_gives_equivalent_bindings() {
    init_tracing();
    let dispatcher = Dispatcher::<OnStream>::default();
    let input: Vec<Callback<Outcome>> = callbacks![
        || -> Outcome { Ok(()) },
        |_: Message| -> Outcome { Ok(()) },
    ];

    let first = dispatcher.bind(input.clone()).unwrap();
    let second = dispatcher.bind(input).unwrap();
    assert_eq!(first.report(), second.report());
    assert_eq!(
        first.iter().map(|b| b.source()).collect::<Vec<_>>(),
        vec![Source::Supplied(1), Source::Supplied(0)]
    );
}

#[test]
fn test_poll_loop_with_traced_dispatch() {
    init_tracing();
    let delivered = Arc::new(AtomicUsize::new(0));
    let d = delivered.clone();

    let dispatcher = Dispatcher::<OnStream>::new(
        Config::default()
            .with_trace_dispatch(true)
            .with_deny_shadowed(true),
    );
    let binding = Arc::new(
        dispatcher
            .bind(callbacks![
                move |_: Message| -> Outcome {
                    d.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
                || -> Outcome { Err(ConsumerError("end of partition".into())) },
            ])
            .unwrap(),
    );

    let source = (0..3).map(|i| OnStream::Message(message(i))).chain([OnStream::Eof]);
    let outcomes: Vec<Outcome> = source.map(|event| binding.dispatch(event)).collect();

    assert_eq!(delivered.load(Ordering::SeqCst), 3);
    assert_eq!(
        outcomes.last(),
        Some(&Err(ConsumerError("end of partition".into())))
    );
}

#[test]
fn test_report_describes_binding() {
    init_tracing();
    let binding =
        callbind::bind::<OnPoll, _>(vec![Callback::new(|_: Message| -> Outcome { Ok(()) })
            .named("on_message")])
        .unwrap();
    let report = binding.report();
    assert_eq!(report.defaults().count(), 1);
    let text = report.to_string();
    assert!(text.contains("-> on_message [supplied #0]"));
    assert!(text.contains("-> Error::default [default]"));
}

#[test]
fn test_trace_dispatch_logs_each_occurrence() {
    let logs = capture_logs(|| {
        let dispatcher =
            Dispatcher::<OnStream>::new(Config::default().with_trace_dispatch(true));
        let binding = dispatcher
            .bind(vec![
                Callback::new(|_: Message| -> Outcome { Ok(()) }).named("on_message"),
                Callback::new(|| -> Outcome { Ok(()) }).named("on_eof"),
            ])
            .unwrap();
        binding.dispatch(OnStream::Message(message(1))).unwrap();
        binding.dispatch(OnStream::Eof).unwrap();
    });

    let dispatched: Vec<_> = logs.lines().filter(|l| l.contains("dispatching")).collect();
    assert_eq!(dispatched.len(), 2);
    assert!(dispatched[0].contains("TRACE"));
    assert!(dispatched[0].contains("on_message"));
    assert!(dispatched[1].contains("on_eof"));
}

#[test]
fn test_dispatch_is_silent_without_trace_dispatch() {
    let logs = capture_logs(|| {
        let binding = callbind::bind::<OnStream, _>(callbacks![
            |_: Message| -> Outcome { Ok(()) },
            || -> Outcome { Ok(()) },
        ])
        .unwrap();
        binding.dispatch(OnStream::Eof).unwrap();
    });
    assert!(!logs.contains("dispatching"));
    assert!(logs.contains("Event kind bound"));
}

#[test]
fn test_shadowed_callback_is_logged_as_warning() {
    let logs = capture_logs(|| {
        callbind::bind::<OnStream, _>(vec![
            Callback::new(|_: Message| -> Outcome { Ok(()) }),
            Callback::new(|| -> Outcome { Ok(()) }),
            Callback::new(|_: Message| -> Outcome { Ok(()) }).named("late_message"),
        ])
        .unwrap();
    });

    let warning = logs
        .lines()
        .find(|l| l.contains("shadowed by an earlier one"))
        .expect("shadowed callback must be logged");
    assert!(warning.contains("WARN"));
    assert!(warning.contains("late_message"));
}

#[test]
fn test_rejected_shadowed_callback_is_logged_before_error() {
    let mut result = None;
    let logs = capture_logs(|| {
        let dispatcher = Dispatcher::<OnStream>::new(Config::default().with_deny_shadowed(true));
        result = Some(dispatcher.bind(vec![
            Callback::new(|| -> Outcome { Ok(()) }),
            Callback::new(|_: Message| -> Outcome { Ok(()) }),
            Callback::new(|| -> Outcome { Ok(()) }).named("late_eof"),
        ]));
    });

    assert!(matches!(
        result,
        Some(Err(Error::ShadowedCallback { position: 2, .. }))
    ));
    let line = logs
        .lines()
        .find(|l| l.contains("Shadowed callback rejected"))
        .expect("rejection must be logged");
    assert!(line.contains("DEBUG"));
    assert!(line.contains("late_eof"));
    assert!(!logs.contains("will never run"));
}
