use std::io::ErrorKind;
use std::net::TcpListener;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use framepipe_session::{drive, KeepAliveConfig};
use framepipe_stream::FramedStream;
use tracing::{info, warn};

use crate::cmd::{parse_duration, ServeArgs};
use crate::exit::{io_error, CliError, CliResult, SUCCESS};
use crate::output::{print_message, OutputFormat};

/// How often the accept loop re-checks the shutdown flag while idle.
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run(args: ServeArgs, format: OutputFormat) -> CliResult<i32> {
    let listener = TcpListener::bind(&args.addr).map_err(|err| io_error("bind failed", err))?;
    let local = listener
        .local_addr()
        .map_err(|err| io_error("bind failed", err))?;
    // Poll for connections so a Ctrl-C between them stops the loop now,
    // not after the next client shows up.
    listener
        .set_nonblocking(true)
        .map_err(|err| io_error("bind failed", err))?;
    info!(local = %local, "listening");

    let config = KeepAliveConfig {
        count: args.count,
        interval: parse_duration(&args.interval)?,
        payload: args.data.clone().into_bytes(),
    };

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    while running.load(Ordering::SeqCst) {
        let (socket, peer) = match listener.accept() {
            Ok(accepted) => accepted,
            Err(err) if err.kind() == ErrorKind::WouldBlock => {
                std::thread::sleep(ACCEPT_POLL_INTERVAL);
                continue;
            }
            Err(err) => return Err(io_error("accept failed", err)),
        };
        // The session itself stays blocking; only accept polls.
        socket
            .set_nonblocking(false)
            .map_err(|err| io_error("accept failed", err))?;
        info!(peer = %peer, "connection accepted");

        let mut stream = FramedStream::open(socket);
        match drive(&mut stream, &config) {
            Ok(replies) => {
                for (i, reply) in replies.iter().enumerate() {
                    print_message(reply, &peer.to_string(), i + 1, format);
                }
                info!(peer = %peer, rounds = replies.len(), "session complete");
            }
            // A misbehaving client must not take the server down.
            Err(err) => warn!(peer = %peer, error = %err, "session failed"),
        }
        let _ = stream.close();

        if args.once {
            return Ok(SUCCESS);
        }
    }

    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
