//! Derivation of screen state from raw store records.
//!
//! Every function here is best-effort: a record that cannot be decoded is
//! counted in the returned `skipped` total and logged, never propagated.

use chrono::{DateTime, Duration, NaiveTime, Offset, TimeZone, Utc};
use futures::future::join_all;
use serde::Serialize;
use studyconnect_core::{
    color::ColorTag,
    models::{
        group::GroupDisplay,
        session::Session,
        user::{Coordinate, UserLocation, UserPin, UserProfile},
    },
    record::Record,
    store::Geocoder,
};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TodayCount {
    pub count: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestUpcoming {
    /// `None` when no session lies strictly in the future.
    pub session: Option<Session>,
    pub skipped: usize,
}

/// The three outputs of one aggregation pass over a session snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionAggregate {
    pub today_count: usize,
    pub next_session: Option<Session>,
    /// Records that could not be decoded as sessions.
    pub skipped: usize,
}

/// Decoded sessions in ascending `sessionDate` order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionList {
    pub sessions: Vec<Session>,
    pub skipped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PinSet {
    pub pins: Vec<UserPin>,
    pub geocode_failures: usize,
    /// Users with neither a coordinate nor a location text.
    pub skipped: usize,
    /// Users who turned location visibility off.
    pub hidden: usize,
}

/// UTC bounds of the local calendar day containing `now`, as the half-open
/// interval `[start, start + 24h)`. When midnight does not exist locally the
/// day starts at the first local time that does.
pub fn local_day_bounds<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let local_now = now.with_timezone(tz);
    let midnight = local_now.date_naive().and_time(NaiveTime::MIN);

    let start = (0..24 * 60)
        .find_map(|minute| {
            tz.from_local_datetime(&(midnight + Duration::minutes(minute)))
                .earliest()
        })
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| {
            let offset = Duration::seconds(local_now.offset().fix().local_minus_utc() as i64);
            Utc.from_utc_datetime(&(midnight - offset))
        });

    (start, start + Duration::hours(24))
}

/// Decodes every record with one rule, keeping input order.
fn decode_all(records: &[Record]) -> (Vec<Session>, usize) {
    let mut sessions = Vec::with_capacity(records.len());
    let mut skipped = 0;
    for record in records {
        match Session::from_record(record) {
            Ok(session) => sessions.push(session),
            Err(e) => {
                debug!("{}", e);
                skipped += 1;
            }
        }
    }
    (sessions, skipped)
}

fn count_today<Tz: TimeZone>(sessions: &[Session], now: DateTime<Utc>, tz: &Tz) -> usize {
    let (start, end) = local_day_bounds(now, tz);
    sessions
        .iter()
        .filter(|s| s.session_date >= start && s.session_date < end)
        .count()
}

fn nearest_upcoming(sessions: &[Session], now: DateTime<Utc>) -> Option<Session> {
    let mut nearest: Option<&Session> = None;
    for session in sessions.iter().filter(|s| s.session_date > now) {
        // Strict comparison keeps the first of equal instants.
        if nearest.is_none_or(|best| session.session_date < best.session_date) {
            nearest = Some(session);
        }
    }
    nearest.cloned()
}

fn report_skipped(what: &str, skipped: usize) {
    if skipped > 0 {
        warn!("Skipped {} malformed {} records", skipped, what);
    }
}

/// Number of sessions in the local day of `now`. Records without a parseable
/// `sessionDate` are skipped and counted, never fatal.
pub fn compute_today_count<Tz: TimeZone>(sessions: &[Record], now: DateTime<Utc>, tz: &Tz) -> TodayCount {
    let (decoded, skipped) = decode_all(sessions);
    report_skipped("session", skipped);
    TodayCount {
        count: count_today(&decoded, now, tz),
        skipped,
    }
}

/// The earliest session strictly after `now`; ties go to the first record in
/// input order.
pub fn compute_nearest_upcoming(sessions: &[Record], now: DateTime<Utc>) -> NearestUpcoming {
    let (decoded, skipped) = decode_all(sessions);
    report_skipped("session", skipped);
    NearestUpcoming {
        session: nearest_upcoming(&decoded, now),
        skipped,
    }
}

/// Today count and next session from a single decode of the snapshot.
pub fn aggregate_sessions<Tz: TimeZone>(
    sessions: &[Record],
    now: DateTime<Utc>,
    tz: &Tz,
) -> SessionAggregate {
    let (decoded, skipped) = decode_all(sessions);
    report_skipped("session", skipped);

    SessionAggregate {
        today_count: count_today(&decoded, now, tz),
        next_session: nearest_upcoming(&decoded, now),
        skipped,
    }
}

/// Decodes sessions and orders them by `sessionDate`, keeping input order
/// between equal instants.
pub fn decode_sessions(records: &[Record]) -> SessionList {
    let (mut sessions, skipped) = decode_all(records);
    sessions.sort_by_key(|s| s.session_date);
    report_skipped("session", skipped);
    SessionList { sessions, skipped }
}

/// Sessions inside the local day of `day_of`.
pub fn sessions_on_day<Tz: TimeZone>(records: &[Record], day_of: DateTime<Utc>, tz: &Tz) -> SessionList {
    let (start, end) = local_day_bounds(day_of, tz);
    let mut list = decode_sessions(records);
    list.sessions
        .retain(|s| s.session_date >= start && s.session_date < end);
    list
}

/// One display record per group record; missing fields fall back rather than
/// dropping the group.
pub fn build_group_display_list(groups: &[Record]) -> Vec<GroupDisplay> {
    groups.iter().map(GroupDisplay::from_record).collect()
}

enum PinOutcome {
    Resolved(Coordinate),
    GeocodeFailed,
    NoLocation,
    Hidden,
}

/// Builds map pins for the given users.
///
/// Text locations are geocoded concurrently and joined with wait-for-all
/// semantics: a failed lookup drops only that user's pin. Pins keep input
/// order, and users without a stored `pinColor` take palette colors in that
/// order.
pub async fn build_user_pins<G>(users: &[Record], geocoder: &G) -> PinSet
where
    G: Geocoder + ?Sized,
{
    let profiles: Vec<UserProfile> = users.iter().map(UserProfile::from_record).collect();

    let lookups = profiles.iter().map(|profile| async move {
        if !profile.location_visible {
            return PinOutcome::Hidden;
        }
        match &profile.location {
            Some(UserLocation::Coordinate(coordinate)) => PinOutcome::Resolved(*coordinate),
            Some(UserLocation::Text(text)) => match geocoder.geocode(text).await {
                Ok(coordinate) => PinOutcome::Resolved(coordinate),
                Err(e) => {
                    warn!("Geocoding failed for user {}: {}", profile.id, e);
                    PinOutcome::GeocodeFailed
                }
            },
            None => PinOutcome::NoLocation,
        }
    });
    let outcomes = join_all(lookups).await;

    let mut set = PinSet::default();
    let mut palette_index = 0;
    for (profile, outcome) in profiles.iter().zip(outcomes) {
        match outcome {
            PinOutcome::Resolved(coordinate) => {
                let color = profile.pin_color.unwrap_or_else(|| {
                    let color = ColorTag::from_palette(palette_index);
                    palette_index += 1;
                    color
                });
                set.pins.push(UserPin {
                    user_id: profile.id.clone(),
                    name: profile.name.clone(),
                    coordinate,
                    color,
                });
            }
            PinOutcome::GeocodeFailed => set.geocode_failures += 1,
            PinOutcome::NoLocation => set.skipped += 1,
            PinOutcome::Hidden => set.hidden += 1,
        }
    }

    report_skipped("user location", set.skipped);
    set
}
