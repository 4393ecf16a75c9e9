use chrono::TimeZone;
use chrono_tz::America::Los_Angeles;

use solar_incidence::provider::Almanac;
use solar_incidence::{IncidentAngleCalculator, SiteConfiguration};

fn main() {
    let site = SiteConfiguration::default();
    let dt = Los_Angeles.with_ymd_and_hms(2017, 6, 21, 11, 0, 0).unwrap();

    let record = IncidentAngleCalculator::new(Almanac)
        .compute(&dt, &site)
        .unwrap();

    println!("=== Incident Angle Example ===");
    println!(
        "Location: Portland, OR ({:.4}°N, {:.4}°W) @ {} m",
        site.latitude, -site.longitude, site.elevation
    );
    println!("Surface: tilt {}°, azimuth {}° (south, CCW)", site.tilt, site.azimuth);
    println!("Date/Time: {} ({} UTC)", dt, record.timestamp);
    println!();
    println!("--- Sun ---");
    println!("Right ascension: {:.3}°", record.right_ascension);
    println!("Declination: {:.3}°", record.declination);
    println!("Hour angle: {:.3}°", record.hour_angle);
    println!("Zenith: {:.3}°", record.zenith);
    println!("Azimuth: {:.3}° (0°=N, 90°=E, 180°=S)", record.azimuth);
    println!();
    println!("--- Surface ---");
    println!("Incident angle: {:.3}°", record.incident_angle);
}
