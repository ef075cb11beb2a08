use std::cmp::Ordering;

/// Represents a class file version.
///
/// Use the associated constants (like [`Version::V1_1`]) if you want that version.
///
/// Take a look at [the list of class file versions](https://docs.oracle.com/javase/specs/jvms/se8/html/jvms-4.html#jvms-4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
	major: u16,
	minor: u16,
}

impl Version {
	pub const V1_1: Version = Version::new(45, 3);
	pub const V1_2: Version = Version::new(46, 0);
	pub const V1_3: Version = Version::new(47, 0);
	pub const V1_4: Version = Version::new(48, 0);
	pub const V1_5: Version = Version::new(49, 0);
	pub const V1_6: Version = Version::new(50, 0);
	pub const V1_7: Version = Version::new(51, 0);
	pub const V1_8: Version = Version::new(52, 0);

	/// The oldest version we can read. Versions `45.0` to `45.2` came before Java 1.1.
	pub const OLDEST_SUPPORTED: Version = Version::new(45, 0);
	/// The newest version we can read, any minor version of Java 8 class files.
	pub const NEWEST_SUPPORTED: Version = Version::new(52, u16::MAX);

	pub const fn new(major: u16, minor: u16) -> Version {
		Version { major, minor }
	}

	pub const fn major(self) -> u16 {
		self.major
	}

	pub const fn minor(self) -> u16 {
		self.minor
	}

	pub fn is_supported(self) -> bool {
		Version::OLDEST_SUPPORTED <= self && self <= Version::NEWEST_SUPPORTED
	}
}

impl PartialOrd for Version {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Version {
	fn cmp(&self, other: &Self) -> Ordering {
		self.major.cmp(&other.major)
			.then_with(|| self.minor.cmp(&other.minor))
	}
}
