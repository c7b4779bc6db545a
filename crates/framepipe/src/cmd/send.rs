use std::fs;
use std::net::TcpStream;

use framepipe_session::read_message;
use framepipe_stream::FramedStream;

use crate::cmd::{parse_duration, SendArgs};
use crate::exit::{io_error, session_error, stream_error, CliResult, SUCCESS};
use crate::output::{print_message, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let socket =
        TcpStream::connect(&args.addr).map_err(|err| io_error("connect failed", err))?;

    if args.wait {
        // Timeouts belong to the conduit, not the framing layer.
        let timeout = parse_duration(&args.wait_timeout)?;
        let timeout = if timeout.is_zero() { None } else { Some(timeout) };
        socket
            .set_read_timeout(timeout)
            .map_err(|err| io_error("set timeout failed", err))?;
    }

    let payload = resolve_payload(&args)?;
    let mut stream = FramedStream::open(socket);
    stream
        .write(&payload)
        .map_err(|err| stream_error("send failed", err))?;

    if args.wait {
        match read_message(&mut stream).map_err(|err| session_error("receive failed", err))? {
            Some(reply) => print_message(&reply, &args.addr, 1, format),
            None => {}
        }
    }

    stream
        .close()
        .map_err(|err| stream_error("close failed", err))?;
    Ok(SUCCESS)
}

fn resolve_payload(args: &SendArgs) -> CliResult<Vec<u8>> {
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Ok(Vec::new())
}
