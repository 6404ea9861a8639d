//! Command execution.

use crate::{Commands, LsFilter};
use colored::Colorize;
use ssdpc_client::Client;
use ssdpc_protocol::Service;

/// Executes a command against a connected client and returns the formatted
/// output.
pub async fn execute(
    client: &mut Client,
    cmd: Commands,
    json: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    match cmd {
        Commands::Register {
            service_type,
            usn,
            server,
            location,
        } => {
            let service = Service {
                service_type,
                usn,
                server,
                location,
            };
            client.register_service(&service).await?;
            Ok(format!(
                "{} service {}",
                "Registered".green(),
                service.usn.cyan()
            ))
        }

        Commands::Ls { filter } => {
            let services = match filter {
                None => client.get_services_all().await?,
                Some(LsFilter::Type { filter }) => client.get_services_by_type(&filter).await?,
                Some(LsFilter::Usn { filter }) => client.get_services_by_usn(&filter).await?,
            };

            if json {
                return Ok(serde_json::to_string_pretty(&services)?);
            }
            Ok(format_services(&services))
        }
    }
}

/// Formats services for display, one block per service.
fn format_services(services: &[Service]) -> String {
    if services.is_empty() {
        return "No matching services returned".yellow().to_string();
    }

    let mut output = String::new();
    for service in services {
        output.push_str(&format!(
            "{}: {}\n{}: {}\n{}: {}\n\n",
            "Type".bold(),
            service.service_type.cyan(),
            "USN".bold(),
            service.usn,
            "Location".bold(),
            service.location,
        ));
    }
    output.truncate(output.len() - 1);
    output
}
