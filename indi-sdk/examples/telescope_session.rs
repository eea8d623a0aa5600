//! Connect, slew a telescope, and capture a camera frame: the classic
//! scripted sequence, written linearly against the in-memory mock so it runs
//! without an INDI server.
//!
//! Run with:
//! ```text
//! cargo run -p indi-sdk --example telescope_session --features test-support
//! ```

use std::sync::Arc;
use std::time::Duration;

use indi_api::mock::MockConnection;
use indi_api::{
    BlobMode, PropertyKind, PropertyRecord, PropertyState, SwitchState, WidgetPayload,
    WidgetRecord,
};
use indi_sdk::{PollOptions, Session, SessionConfig};
use tokio_util::sync::CancellationToken;
use tracing::info;

// RA in decimal hours, DEC in decimal degrees.
const VEGA: (f64, f64) = (18.6156489, 38.78368896);

#[tokio::main]
async fn main() -> indi_sdk::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let conn = Arc::new(MockConnection::new());
    seed_simulators(&conn);

    let config = SessionConfig::new("indi", 7624).with_poll(PollOptions {
        interval: Duration::from_millis(200),
        timeout: Some(Duration::from_secs(10)),
    });
    let session = Session::new(Arc::clone(&conn) as Arc<dyn indi_api::Connection>, config);

    if !session.connect() {
        return Ok(());
    }
    let cancel = CancellationToken::new();

    info!("listing devices");
    for device in session.list_devices() {
        info!(device = device.name(), "known");
        for property in device.list_properties() {
            info!("  > {}", property);
            for widget in property.widgets() {
                info!("      {}", widget);
            }
        }
    }

    info!("waiting for telescope");
    let telescope = session.resolve_device("Telescope Simulator", &cancel).await?;

    if !telescope.is_connected() {
        let mut switches = telescope.get_switch_property("CONNECTION", &cancel).await?;
        switches.reset();
        switches.set_state(0, SwitchState::On);
        session.send_new(switches.record());
    }

    info!(ra = VEGA.0, dec = VEGA.1, "tracking Vega");
    let mut mode = telescope.get_switch_property("ON_COORD_SET", &cancel).await?;
    mode.reset();
    mode.set_state(0, SwitchState::On); // index 0 TRACK, 1 SLEW, 2 SYNC
    session.send_new(mode.record());

    let mut coords = telescope
        .get_number_property("EQUATORIAL_EOD_COORD", &cancel)
        .await?;
    coords.set_value(0, VEGA.0);
    coords.set_value(1, VEGA.1);
    session.send_new(coords.record());

    info!("capturing a frame");
    let camera = session.resolve_device("CCD Simulator", &cancel).await?;
    session.set_blob_mode(camera.name(), "CCD1", BlobMode::Also);
    let frame = camera.get_blob_property("CCD1", &cancel).await?;

    let out = std::env::temp_dir();
    for blob in frame.blobs() {
        let path = indi_sdk::capture::save_blob(&out, &blob)?;
        info!(path = %path.display(), bytes = blob.size(), "frame written");
    }

    info!("disconnecting");
    session.disconnect();
    Ok(())
}

/// Stand in for the simulator drivers a live server would announce.
fn seed_simulators(conn: &MockConnection) {
    conn.announce_device("Telescope Simulator");
    conn.announce_device("CCD Simulator");

    conn.announce_property(switch_property(
        "Telescope Simulator",
        "CONNECTION",
        &[("CONNECT", SwitchState::Off), ("DISCONNECT", SwitchState::On)],
    ));
    conn.announce_property(switch_property(
        "Telescope Simulator",
        "ON_COORD_SET",
        &[
            ("TRACK", SwitchState::On),
            ("SLEW", SwitchState::Off),
            ("SYNC", SwitchState::Off),
        ],
    ));

    let mut coords = empty_property(
        "Telescope Simulator",
        "EQUATORIAL_EOD_COORD",
        PropertyKind::Number,
    );
    coords.widgets = ["RA", "DEC"]
        .iter()
        .map(|name| WidgetRecord {
            name: name.to_string(),
            label: name.to_string(),
            payload: WidgetPayload::Number {
                value: 0.0,
                min: -90.0,
                max: 90.0,
                step: 0.0,
                format: "%10.6m".to_string(),
            },
        })
        .collect();
    conn.announce_property(coords);

    let mut frame = empty_property("CCD Simulator", "CCD1", PropertyKind::Blob);
    frame.widgets = vec![WidgetRecord {
        name: "CCD1".to_string(),
        label: "Image".to_string(),
        payload: WidgetPayload::Blob {
            data: vec![0x53, 0x49, 0x4D, 0x50, 0x4C, 0x45],
            format: ".fits".to_string(),
        },
    }];
    conn.announce_property(frame);
}

fn empty_property(device: &str, name: &str, kind: PropertyKind) -> PropertyRecord {
    PropertyRecord {
        device: device.to_string(),
        name: name.to_string(),
        label: name.to_string(),
        group: "Main Control".to_string(),
        type_code: kind.code(),
        state: PropertyState::Idle,
        permission: "rw".to_string(),
        timestamp: String::new(),
        widgets: Vec::new(),
    }
}

fn switch_property(
    device: &str,
    name: &str,
    elements: &[(&str, SwitchState)],
) -> PropertyRecord {
    let mut record = empty_property(device, name, PropertyKind::Switch);
    record.widgets = elements
        .iter()
        .map(|(name, state)| WidgetRecord {
            name: name.to_string(),
            label: name.to_string(),
            payload: WidgetPayload::Switch { state: *state },
        })
        .collect();
    record
}
