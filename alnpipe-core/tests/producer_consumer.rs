//! End-to-end test of the concurrent pipeline: a producer thread parses and
//! normalizes m5 records while a consumer drains the bounded queue.

use std::io::Cursor;
use std::sync::Arc;
use std::thread;

use alnpipe_core::{
    run_producer, Alignment, AlnFormat, BoundedQueue, GroupBy, PipelineConfig,
};

fn m5_line(read: &str, strand: char, qstr: &str, tstr: &str) -> String {
    format!(
        "{read} 1000 10 60 0 ref1 5000 100 150 {strand} 0 0 0 0 0 0 {qstr} 0 {tstr}"
    )
}

#[test]
fn producer_and_consumer_run_concurrently() {
    let mut input = String::new();
    for i in 0..200 {
        input.push_str(&m5_line(
            &format!("read{i}/0_100"),
            '+',
            "ACGTACGTAC",
            "ACGTAGGTAC",
        ));
        input.push('\n');
        // blank lines are skipped
        if i % 10 == 0 {
            input.push('\n');
        }
    }

    let config = PipelineConfig {
        format: AlnFormat::M5,
        group_by: GroupBy::Target,
        push_gaps: true,
        trim: 2,
    };
    // a small capacity forces backpressure on the producer
    let queue = Arc::new(BoundedQueue::new(4));

    let consumer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            let mut records: Vec<Alignment> = Vec::new();
            while let Some(aln) = queue.pop() {
                records.push(aln);
            }
            records
        })
    };

    let pushed = run_producer(Cursor::new(input), &config, &queue).unwrap();
    queue.close();
    let records = consumer.join().unwrap();

    assert_eq!(pushed, 200);
    assert_eq!(records.len(), 200);

    // single producer, single consumer: output order equals input order
    for (i, aln) in records.iter().enumerate() {
        assert_eq!(aln.source_id, format!("read{i}/0_100"));
        assert_eq!(aln.target_id, "ref1");
        // normalized strings stay paired and carry no gap/gap columns
        assert_eq!(aln.query_aligned.len(), aln.target_aligned.len());
        assert!(!aln
            .query_aligned
            .bytes()
            .zip(aln.target_aligned.bytes())
            .any(|(q, t)| q == b'-' && t == b'-'));
        // two aligned target bases trimmed from each end of the m5 start
        assert_eq!(aln.start, 103);
    }
}

#[test]
fn consumer_sees_closed_queue_after_drain() {
    let config = PipelineConfig {
        format: AlnFormat::M5,
        group_by: GroupBy::Target,
        push_gaps: false,
        trim: 0,
    };
    let queue = Arc::new(BoundedQueue::new(16));

    let input = m5_line("read0/0_5", '-', "ACGTT", "ACGTT");
    let pushed = run_producer(Cursor::new(input), &config, &queue).unwrap();
    assert_eq!(pushed, 1);
    queue.close();

    let aln = queue.pop().unwrap();
    // reverse strand, grouped by target: both strings reverse complemented
    assert_eq!(aln.query_aligned, "AACGT");
    assert_eq!(aln.target_aligned, "AACGT");
    assert!(queue.pop().is_none());
}
