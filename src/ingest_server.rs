use std::{
    io::{BufRead, BufReader},
    net::{TcpListener, TcpStream},
    sync::Arc,
    thread,
};

use crate::{append_ingest_log, frame_buffer::FrameBuffer, FrameRecord};

/// Accepts frame reports from the instrumented target: newline-delimited JSON
/// records over localhost TCP. A bind failure leaves the app running; the
/// query path simply keeps serving an empty buffer.
pub(crate) fn spawn_ingest_server(buffer: Arc<FrameBuffer>, bind_addr: String) {
    let spawn_result = thread::Builder::new()
        .name("frame-ingest-listener".to_string())
        .spawn(move || match TcpListener::bind(&bind_addr) {
            Ok(listener) => {
                append_ingest_log(&format!("listening for frame reports on {bind_addr}"));
                run_listener(listener, buffer);
            }
            Err(error) => {
                append_ingest_log(&format!("failed to bind {bind_addr}: {error}"));
            }
        });

    if let Err(error) = spawn_result {
        append_ingest_log(&format!("failed to spawn ingest listener thread: {error}"));
    }
}

pub(crate) fn run_listener(listener: TcpListener, buffer: Arc<FrameBuffer>) {
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let connection_buffer = Arc::clone(&buffer);
                let handler = thread::Builder::new()
                    .name("frame-ingest-connection".to_string())
                    .spawn(move || handle_connection(stream, connection_buffer));
                if let Err(error) = handler {
                    append_ingest_log(&format!("failed to spawn connection handler: {error}"));
                }
            }
            Err(error) => append_ingest_log(&format!("incoming connection failed: {error}")),
        }
    }
}

fn handle_connection(stream: TcpStream, buffer: Arc<FrameBuffer>) {
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown peer".to_string());
    append_ingest_log(&format!("target connected from {peer}"));

    let reader = BufReader::new(stream);
    for line in reader.lines() {
        let Ok(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        // Malformed samples are dropped but stay visible in the aggregate
        // counters; the connection stays up.
        match parse_frame_line(&line) {
            Some(record) => {
                buffer.append(record);
            }
            None => buffer.count_rejected(),
        }
    }

    append_ingest_log(&format!("target disconnected: {peer}"));
}

pub(crate) fn parse_frame_line(line: &str) -> Option<FrameRecord> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    serde_json::from_str::<FrameRecord>(trimmed).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io::Write,
        net::TcpStream,
        time::{Duration, Instant},
    };

    #[test]
    fn parse_frame_line_accepts_wire_records_and_skips_garbage() {
        let record = parse_frame_line(r#"{"frame_index":12,"started_at":340000}"#)
            .expect("valid line should parse");
        assert_eq!(record.frame_index, 12);
        assert_eq!(record.started_at, 340_000);

        assert!(parse_frame_line("").is_none());
        assert!(parse_frame_line("   ").is_none());
        assert!(parse_frame_line("not json").is_none());
        assert!(parse_frame_line(r#"{"frame_index":"twelve"}"#).is_none());
    }

    fn wait_for_accepted(buffer: &FrameBuffer, expected: u64) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while buffer.stats().accepted < expected && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn listener_feeds_the_buffer_and_survives_bad_lines() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("ephemeral bind should succeed");
        let addr = listener.local_addr().expect("local addr should be known");
        let buffer = Arc::new(FrameBuffer::new(16));

        let listener_buffer = Arc::clone(&buffer);
        thread::spawn(move || run_listener(listener, listener_buffer));

        let mut stream = TcpStream::connect(addr).expect("connect should succeed");
        stream
            .write_all(
                concat!(
                    "{\"frame_index\":1,\"started_at\":1000}\n",
                    "this line is garbage\n",
                    "\n",
                    "{\"frame_index\":0,\"started_at\":2000}\n",
                    "{\"frame_index\":2,\"started_at\":2000}\n",
                )
                .as_bytes(),
            )
            .expect("write should succeed");
        drop(stream);

        wait_for_accepted(&buffer, 2);
        let tail = buffer.tail(10);
        let indices: Vec<u64> = tail.iter().map(|record| record.frame_index).collect();
        assert_eq!(indices, vec![1, 2]);
        // The garbage line and the out-of-order record are both anomalies;
        // the blank line is not.
        assert_eq!(buffer.stats().rejected, 2);
    }
}
