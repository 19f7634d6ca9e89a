//! Example demonstrating how the metadata repository is populated and queried
//!
//! Run with: cargo run --example repository_usage

use config_metadata::metadata::{Property, Source};
use config_metadata::repository::Repository;
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut repository = Repository::new();

    // A loader would produce these entities from a parsed metadata document.
    let server = Source::new("server", "com.example.ServerProperties");
    repository.add_sources([server.clone()])?;

    let mut port = Property::new("server.port");
    port.data_type = Some("integer".to_string());
    port.default_value = Some(json!(8080));
    port.description = Some("Port the server listens on.".to_string());
    repository.add_property(port, Some(&server))?;

    let mut address = Property::new("server.address");
    address.data_type = Some("string".to_string());
    address.description = Some("Network address to bind to.".to_string());
    repository.add_property(address, Some(&server))?;

    // A second contributor describing the same group; its colliding entries
    // lose, its new entries land.
    let mut other = Repository::new();
    let rescan = Source::new("server", "com.example.ServerProperties");
    other.add_sources([rescan.clone()])?;
    let mut port_again = Property::new("server.port");
    port_again.default_value = Some(json!(9090));
    other.add_property(port_again, Some(&rescan))?;
    let mut shutdown = Property::new("server.shutdown");
    shutdown.data_type = Some("string".to_string());
    other.add_property(shutdown, Some(&rescan))?;

    repository.include(other);

    // Consumer side: render the catalog.
    for (group_id, group) in repository.all_groups().iter() {
        println!("[{group_id}]");
        for (id, property) in group.properties() {
            let default = property
                .default_value
                .as_ref()
                .map(|value| format!(" (default: {value})"))
                .unwrap_or_default();
            println!("  {id}{default}");
        }
    }

    println!("\n{} properties total", repository.all_properties().len());

    Ok(())
}
