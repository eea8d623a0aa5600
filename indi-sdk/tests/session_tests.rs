//! End-to-end tests of the session/device/property pipeline over the
//! in-memory mock connection
//!
//! Time is paused in every async test; tokio advances it past each poll
//! sleep deterministically, so "the device appears 1.2s later" runs
//! instantly while still exercising the real wait path.

use std::sync::Arc;
use std::time::Duration;

use indi_api::mock::MockConnection;
use indi_api::{
    BlobMode, PropertyKind, PropertyRecord, PropertyState, SwitchState, WidgetPayload,
    WidgetRecord,
};
use indi_sdk::delegate::Delegating;
use indi_sdk::{AttrValue, PollOptions, Property, SdkError, Session, SessionConfig};
use tokio_util::sync::CancellationToken;

fn session_over(conn: Arc<MockConnection>) -> Session {
    let config = SessionConfig::new("indi", 7624).with_poll(PollOptions {
        interval: Duration::from_millis(100),
        timeout: Some(Duration::from_secs(5)),
    });
    Session::new(conn, config)
}

fn property_record(device: &str, name: &str, kind: PropertyKind) -> PropertyRecord {
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

fn switch_record(device: &str, name: &str, elements: &[(&str, SwitchState)]) -> PropertyRecord {
    let mut record = property_record(device, name, PropertyKind::Switch);
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

fn coord_record(device: &str) -> PropertyRecord {
    let mut record = property_record(device, "EQUATORIAL_EOD_COORD", PropertyKind::Number);
    record.widgets = ["RA", "DEC"]
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
    record
}

#[test]
fn no_devices_means_an_empty_listing() {
    let conn = Arc::new(MockConnection::new());
    let session = session_over(conn);
    assert!(session.connect());
    assert!(session.list_devices().is_empty());
}

#[test]
fn failed_connect_reports_false() {
    let conn = Arc::new(MockConnection::refusing());
    let session = session_over(conn);
    assert!(!session.connect());
}

#[test]
fn listing_has_one_entry_per_announced_name() {
    let conn = Arc::new(MockConnection::new());
    conn.announce_device("Telescope Simulator");
    conn.announce_device("CCD Simulator");
    conn.announce_device("Telescope Simulator");

    let session = session_over(conn);
    let names: Vec<_> = session
        .list_devices()
        .iter()
        .map(|d| d.name().to_string())
        .collect();
    assert_eq!(names, vec!["Telescope Simulator", "CCD Simulator"]);
}

#[tokio::test(start_paused = true)]
async fn resolve_device_waits_for_announcement() {
    let conn = Arc::new(MockConnection::new());
    let session = session_over(Arc::clone(&conn));

    let announcer = Arc::clone(&conn);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1200)).await;
        announcer.announce_device("Telescope Simulator");
    });

    let device = session
        .resolve_device("Telescope Simulator", &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(device.name(), "Telescope Simulator");
}

#[tokio::test(start_paused = true)]
async fn resolve_device_times_out_instead_of_hanging() {
    let conn = Arc::new(MockConnection::new());
    let session = session_over(conn);

    let err = session
        .resolve_device("Nonexistent Mount", &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Timeout(_)));
}

#[tokio::test(start_paused = true)]
async fn device_views_compare_by_underlying_record() {
    let conn = Arc::new(MockConnection::new());
    conn.announce_device("Telescope Simulator");
    conn.announce_device("CCD Simulator");
    let session = session_over(conn);
    let cancel = CancellationToken::new();

    let first = session
        .resolve_device("Telescope Simulator", &cancel)
        .await
        .unwrap();
    let second = session
        .resolve_device("Telescope Simulator", &cancel)
        .await
        .unwrap();
    let other = session.resolve_device("CCD Simulator", &cancel).await.unwrap();

    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[tokio::test(start_paused = true)]
async fn device_forwarding_reads_the_underlying_record() {
    let conn = Arc::new(MockConnection::new());
    conn.announce_device("Telescope Simulator");
    let session = session_over(conn);
    let cancel = CancellationToken::new();

    let telescope = session
        .resolve_device("Telescope Simulator", &cancel)
        .await
        .unwrap();

    assert_eq!(
        telescope.forward("device_name").unwrap(),
        AttrValue::Text("Telescope Simulator".to_string())
    );
    match telescope.forward("get_blob_data").unwrap_err() {
        SdkError::MissingOperation(name) => assert_eq!(name, "getBlobData"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(start_paused = true)]
async fn coordinate_property_preserves_widget_order() {
    let conn = Arc::new(MockConnection::new());
    conn.announce_device("Telescope Simulator");
    conn.announce_property(coord_record("Telescope Simulator"));
    let session = session_over(conn);
    let cancel = CancellationToken::new();

    let device = session
        .resolve_device("Telescope Simulator", &cancel)
        .await
        .unwrap();
    let coords = device
        .get_number_property("EQUATORIAL_EOD_COORD", &cancel)
        .await
        .unwrap();

    let widgets = coords.widgets();
    assert_eq!(widgets[0].name(), "RA");
    assert_eq!(widgets[1].name(), "DEC");
    assert_eq!(coords.values(), vec![0.0, 0.0]);
}

#[tokio::test(start_paused = true)]
async fn typed_getter_rejects_the_wrong_kind() {
    let conn = Arc::new(MockConnection::new());
    conn.announce_device("Telescope Simulator");
    conn.announce_property(coord_record("Telescope Simulator"));
    let session = session_over(conn);
    let cancel = CancellationToken::new();

    let device = session
        .resolve_device("Telescope Simulator", &cancel)
        .await
        .unwrap();
    let err = device
        .get_switch_property("EQUATORIAL_EOD_COORD", &cancel)
        .await
        .unwrap_err();

    match err {
        SdkError::KindMismatch {
            requested, actual, ..
        } => {
            assert_eq!(requested, PropertyKind::Switch);
            assert_eq!(actual, PropertyKind::Number);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(start_paused = true)]
async fn generic_getter_infers_the_kind() {
    let conn = Arc::new(MockConnection::new());
    conn.announce_device("Telescope Simulator");
    conn.announce_property(switch_record(
        "Telescope Simulator",
        "CONNECTION",
        &[
            ("CONNECT", SwitchState::Off),
            ("DISCONNECT", SwitchState::On),
        ],
    ));
    let session = session_over(conn);
    let cancel = CancellationToken::new();

    let device = session
        .resolve_device("Telescope Simulator", &cancel)
        .await
        .unwrap();
    let property = device.get_property("CONNECTION", &cancel).await.unwrap();
    assert!(matches!(property, Property::Switch(_)));
    assert_eq!(property.kind(), PropertyKind::Switch);
}

#[tokio::test(start_paused = true)]
async fn is_connected_follows_the_connection_switch() {
    let conn = Arc::new(MockConnection::new());
    conn.announce_device("Telescope Simulator");
    let session = session_over(Arc::clone(&conn));
    let cancel = CancellationToken::new();

    let device = session
        .resolve_device("Telescope Simulator", &cancel)
        .await
        .unwrap();
    // No CONNECTION property yet.
    assert!(!device.is_connected());

    conn.announce_property(switch_record(
        "Telescope Simulator",
        "CONNECTION",
        &[
            ("CONNECT", SwitchState::Off),
            ("DISCONNECT", SwitchState::On),
        ],
    ));
    assert!(!device.is_connected());

    conn.announce_property(switch_record(
        "Telescope Simulator",
        "CONNECTION",
        &[
            ("CONNECT", SwitchState::On),
            ("DISCONNECT", SwitchState::Off),
        ],
    ));
    assert!(device.is_connected());
}

#[tokio::test(start_paused = true)]
async fn submitted_switch_change_reaches_the_connection() {
    let conn = Arc::new(MockConnection::new());
    conn.announce_device("Telescope Simulator");
    conn.announce_property(switch_record(
        "Telescope Simulator",
        "ON_COORD_SET",
        &[
            ("TRACK", SwitchState::Off),
            ("SLEW", SwitchState::On),
            ("SYNC", SwitchState::Off),
        ],
    ));
    let session = session_over(Arc::clone(&conn));
    let cancel = CancellationToken::new();

    let device = session
        .resolve_device("Telescope Simulator", &cancel)
        .await
        .unwrap();
    let mut switches = device
        .get_switch_property("ON_COORD_SET", &cancel)
        .await
        .unwrap();
    switches.reset();
    switches.set_state(0, SwitchState::On);
    session.send_new(switches.record());

    let sent = conn.sent();
    assert_eq!(sent.len(), 1);
    // Re-resolving observes the applied submission.
    let fresh = device
        .get_switch_property("ON_COORD_SET", &cancel)
        .await
        .unwrap();
    assert_eq!(
        fresh.states(),
        vec![SwitchState::On, SwitchState::Off, SwitchState::Off]
    );
}

#[tokio::test(start_paused = true)]
async fn snapshots_do_not_track_later_updates() {
    let conn = Arc::new(MockConnection::new());
    conn.announce_device("Telescope Simulator");
    conn.announce_property(coord_record("Telescope Simulator"));
    let session = session_over(Arc::clone(&conn));
    let cancel = CancellationToken::new();

    let device = session
        .resolve_device("Telescope Simulator", &cancel)
        .await
        .unwrap();
    let stale = device
        .get_number_property("EQUATORIAL_EOD_COORD", &cancel)
        .await
        .unwrap();

    let mut updated = coord_record("Telescope Simulator");
    if let WidgetPayload::Number { value, .. } = &mut updated.widgets[0].payload {
        *value = 18.615;
    }
    conn.announce_property(updated);

    // The held snapshot is unchanged; a fresh resolution sees the update.
    assert_eq!(stale.values(), vec![0.0, 0.0]);
    let fresh = device
        .get_number_property("EQUATORIAL_EOD_COORD", &cancel)
        .await
        .unwrap();
    assert_eq!(fresh.values()[0], 18.615);
}

#[tokio::test(start_paused = true)]
async fn blob_pipeline_captures_the_payload_verbatim() {
    let conn = Arc::new(MockConnection::new());
    conn.announce_device("CCD Simulator");
    let payload = vec![0xFF, 0xD8, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
    let mut record = property_record("CCD Simulator", "CCD1", PropertyKind::Blob);
    record.widgets = vec![WidgetRecord {
        name: "CCD1".to_string(),
        label: "Image".to_string(),
        payload: WidgetPayload::Blob {
            data: payload.clone(),
            format: ".fits".to_string(),
        },
    }];
    conn.announce_property(record);

    let session = session_over(Arc::clone(&conn));
    session.set_blob_mode("CCD Simulator", "CCD1", BlobMode::Also);
    assert_eq!(conn.blob_modes().len(), 1);

    let cancel = CancellationToken::new();
    let device = session.resolve_device("CCD Simulator", &cancel).await.unwrap();
    let blob = device.get_blob_property("CCD1", &cancel).await.unwrap();
    assert_eq!(blob.size(), 10);
    assert_eq!(blob.format(), Some(".fits"));

    let dir = tempfile::tempdir().unwrap();
    let path = indi_sdk::capture::save_blob(dir.path(), &blob.blobs()[0]).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), payload);

    let stem = path.file_name().unwrap().to_str().unwrap();
    // YYYY-MM-DDTHH-MM-SS-mmmZ.fits
    assert_eq!(stem.len(), "2024-03-01T21-14-07-042Z.fits".len());
    assert!(stem.ends_with("Z.fits"));
    assert_eq!(stem.as_bytes()[10], b'T');
}

#[tokio::test(start_paused = true)]
async fn list_properties_is_a_snapshot_without_polling() {
    let conn = Arc::new(MockConnection::new());
    conn.announce_device("Telescope Simulator");
    let session = session_over(Arc::clone(&conn));
    let cancel = CancellationToken::new();

    let device = session
        .resolve_device("Telescope Simulator", &cancel)
        .await
        .unwrap();
    assert!(device.list_properties().is_empty());

    conn.announce_property(coord_record("Telescope Simulator"));
    conn.announce_property(switch_record(
        "Telescope Simulator",
        "CONNECTION",
        &[("CONNECT", SwitchState::Off)],
    ));

    let properties = device.list_properties();
    assert_eq!(properties.len(), 2);
    assert_eq!(properties[0].name(), "EQUATORIAL_EOD_COORD");
    assert_eq!(properties[0].group(), "Main Control");
}
