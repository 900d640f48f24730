use std::net::TcpStream;

use remote::SftpFs;
use ssh2::Session;
use tracing::debug;

use crate::error::CliError;
use crate::inventory::ServerConfig;

/// Establishes an SFTP session with the given server.
///
/// Dials `uri:22`, performs the SSH handshake, authenticates with the
/// inventory password, and opens the SFTP subsystem. The returned backend
/// keeps the underlying session alive for as long as it is held.
pub fn connect(server: &ServerConfig) -> Result<SftpFs, CliError> {
    let address = format!("{}:22", server.uri);
    debug!(address = %address, user = %server.user, "connecting");

    let tcp = TcpStream::connect(&address).map_err(|source| CliError::Connect {
        address: address.clone(),
        source,
    })?;

    let mut session = Session::new().map_err(|source| CliError::Ssh {
        address: address.clone(),
        source,
    })?;
    session.set_tcp_stream(tcp);

    let ssh_step = |source| CliError::Ssh {
        address: address.clone(),
        source,
    };
    session.handshake().map_err(ssh_step)?;
    session
        .userauth_password(&server.user, &server.password)
        .map_err(ssh_step)?;
    let sftp = session.sftp().map_err(ssh_step)?;

    Ok(SftpFs::new(sftp))
}
