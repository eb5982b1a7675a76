use chrono::DateTime;
use chrono::Utc;

/// Source of the wall-clock time stamped into authenticators.
pub trait Clock : Send + Sync {
	fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> DateTime<Utc> {
		Utc::now()
	}
}

/// Always reports the same instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
	fn now(&self) -> DateTime<Utc> {
		self.0
	}
}

/// The "KDC chooses" sentinel for request body times (1970-01-01T00:00:00Z).
pub fn kerberos_epoch() -> DateTime<Utc> {
	DateTime::<Utc>::default()
}
