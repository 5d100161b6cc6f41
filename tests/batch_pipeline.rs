//! End-to-end: reader -> processor -> sink

use fraud_stream_processor::config::OutputFormat;
use fraud_stream_processor::{
    AlertRule, AlertSink, StreamProcessor, TransactionReader, WriterSink,
};

const INPUT: &str = r#"[
    {"timestamp": 300000, "amount": 10, "userID": "u1", "serviceID": "B"},
    {"timestamp": 0, "amount": 10, "userID": "u1", "serviceID": "A"},
    {"timestamp": 60000, "amount": 10, "userID": "u1", "serviceID": "A"}
]"#;

fn render(processor: &StreamProcessor) -> Vec<String> {
    let mut sink = WriterSink::new(Vec::new(), OutputFormat::Text);
    sink.emit_all(processor.alerts());
    let bytes = sink.into_inner().unwrap();
    String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_batch_mode_orders_whole_file() {
    let outcome = TransactionReader::read_str(INPUT);
    assert_eq!(outcome.transactions.len(), 3);

    let mut processor = StreamProcessor::new();
    processor.submit_batch(outcome.transactions);

    let rules: Vec<AlertRule> = processor.alerts().iter().map(|a| a.rule).collect();
    assert_eq!(
        rules,
        vec![
            AlertRule::AmountOutlier,
            AlertRule::AmountOutlier,
            AlertRule::AmountOutlier,
            AlertRule::PingPong,
        ]
    );
    assert_eq!(processor.metrics().late_releases, 0);

    let lines = render(&processor);
    assert_eq!(
        lines.last().map(String::as_str),
        Some("Alert for User u1: User involved in ping-pong activity within 10 minutes.")
    );
}

#[test]
fn test_sequential_submits_keep_arrival_order_across_calls() {
    let outcome = TransactionReader::read_str(INPUT);

    let mut processor = StreamProcessor::new();
    for transaction in outcome.transactions {
        processor.submit(transaction);
    }

    // The t=0 record arrives after t=300000 was already drained
    let rules: Vec<(i64, AlertRule)> = processor
        .alerts()
        .iter()
        .map(|a| (a.transaction_timestamp, a.rule))
        .collect();
    assert_eq!(
        rules,
        vec![
            (300000, AlertRule::AmountOutlier),
            (0, AlertRule::AmountOutlier),
            (0, AlertRule::PingPong),
            (60000, AlertRule::AmountOutlier),
        ]
    );
    assert_eq!(processor.metrics().late_releases, 1);
    assert_eq!(render(&processor).len(), 4);
}

#[test]
fn test_sample_data_file() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/transactions.json");
    let outcome = TransactionReader::from_path(path).unwrap();
    assert_eq!(outcome.skipped, 0);
    assert_eq!(outcome.transactions.len(), 7);

    let mut processor = StreamProcessor::new();
    processor.submit_batch(outcome.transactions);
    assert_eq!(processor.user_count(), 3);
    assert_eq!(processor.metrics().transactions_processed, 7);
    assert!(processor
        .alerts()
        .iter()
        .any(|a| a.user_id == "user_1" && a.rule == AlertRule::PingPong));
}

#[test]
fn test_empty_source_produces_no_alerts() {
    let outcome = TransactionReader::read_str("[]");
    let mut processor = StreamProcessor::new();
    processor.submit_batch(outcome.transactions);

    assert!(processor.alerts().is_empty());
    assert!(render(&processor).is_empty());
}
