use std::net::TcpStream;

use framepipe_session::respond;
use framepipe_stream::FramedStream;
use tracing::info;

use crate::cmd::PingArgs;
use crate::exit::{io_error, session_error, stream_error, CliResult, SUCCESS};
use crate::output::OutputFormat;

pub fn run(args: PingArgs, _format: OutputFormat) -> CliResult<i32> {
    let socket =
        TcpStream::connect(&args.addr).map_err(|err| io_error("connect failed", err))?;
    info!(addr = %args.addr, "connected");

    let mut stream = FramedStream::open(socket);
    let answered = respond(&mut stream, args.reply.as_bytes())
        .map_err(|err| session_error("session failed", err))?;
    stream
        .close()
        .map_err(|err| stream_error("close failed", err))?;

    info!(answered, "server finished the exchange");
    Ok(SUCCESS)
}
