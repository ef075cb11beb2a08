use bytes::BufMut;

/// Builds the bytes of a constant pool, handing out the index of each entry.
pub struct Pool {
	bytes: Vec<u8>,
	next: u16,
}

impl Pool {
	pub fn new() -> Pool {
		Pool { bytes: Vec::new(), next: 1 }
	}

	/// Appends an already encoded entry taking up `slots` slots.
	pub fn raw(&mut self, slots: u16, entry: &[u8]) -> u16 {
		let index = self.next;
		self.bytes.put_slice(entry);
		self.next += slots;
		index
	}

	pub fn utf8(&mut self, string: &str) -> u16 {
		let mut entry = Vec::new();
		entry.put_u8(1);
		entry.put_u16(string.len() as u16);
		entry.put_slice(string.as_bytes());
		self.raw(1, &entry)
	}

	pub fn integer(&mut self, value: i32) -> u16 {
		let mut entry = Vec::new();
		entry.put_u8(3);
		entry.put_i32(value);
		self.raw(1, &entry)
	}

	pub fn float(&mut self, value: f32) -> u16 {
		let mut entry = Vec::new();
		entry.put_u8(4);
		entry.put_f32(value);
		self.raw(1, &entry)
	}

	pub fn double(&mut self, value: f64) -> u16 {
		let mut entry = Vec::new();
		entry.put_u8(6);
		entry.put_f64(value);
		self.raw(2, &entry)
	}

	pub fn long(&mut self, value: i64) -> u16 {
		let mut entry = Vec::new();
		entry.put_u8(5);
		entry.put_i64(value);
		self.raw(2, &entry)
	}

	pub fn class(&mut self, name: &str) -> u16 {
		let name = self.utf8(name);
		let mut entry = Vec::new();
		entry.put_u8(7);
		entry.put_u16(name);
		self.raw(1, &entry)
	}

	/// The `constant_pool_count` item.
	pub fn count(&self) -> u16 {
		self.next
	}
}

/// Assembles a class file, `body` is everything after the `super_class` item.
pub fn assemble(major: u16, pool: &Pool, access: u16, this_class: u16, super_class: u16, body: &[u8]) -> Vec<u8> {
	let mut bytes = Vec::new();
	bytes.put_u32(0xCAFE_BABE);
	bytes.put_u16(0);
	bytes.put_u16(major);
	bytes.put_u16(pool.count());
	bytes.put_slice(&pool.bytes);
	bytes.put_u16(access);
	bytes.put_u16(this_class);
	bytes.put_u16(super_class);
	bytes.put_slice(body);
	bytes
}

/// Appends an attribute with a correct `attribute_length`.
pub fn attribute(bytes: &mut Vec<u8>, name: u16, body: &[u8]) {
	bytes.put_u16(name);
	bytes.put_u32(body.len() as u32);
	bytes.put_slice(body);
}

/// No interfaces, fields, methods or attributes.
pub const EMPTY_BODY: [u8; 8] = [0; 8];

/// The class `Test` with a forward reference from the class entry to its name.
pub fn minimal_class(major: u16) -> Vec<u8> {
	let mut pool = Pool::new();
	let this_class = pool.raw(1, &[7, 0x00, 0x02]);
	pool.utf8("Test");
	assemble(major, &pool, 0x0021, this_class, 0, &EMPTY_BODY)
}
