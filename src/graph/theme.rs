//! Visual theming: colors for subsystems, edges, and highlight states.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color from RGB channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color from RGB channels and an alpha value.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// The same color with a different alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS serialization: `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Color assigned to a subsystem label. Unknown subsystems share the
/// `OTHER` color.
pub fn subsystem_color(subsystem: &str) -> Color {
	match subsystem {
		"KOIOS" => Color::rgb(0x42, 0x85, 0xf4),
		"CRONOS" => Color::rgb(0xea, 0x43, 0x35),
		"ETHIK" => Color::rgb(0x34, 0xa8, 0x53),
		"CORUJA" => Color::rgb(0xfb, 0xbc, 0x05),
		"ATLAS" => Color::rgb(0x9c, 0x27, 0xb0),
		"NEXUS" => Color::rgb(0xff, 0x98, 0x00),
		"HARMONY" => Color::rgb(0x00, 0xbc, 0xd4),
		"VIBE" => Color::rgb(0x79, 0x55, 0x48),
		_ => Color::rgb(0x9e, 0x9e, 0x9e),
	}
}

/// Colors applied by the render pass for base and highlight states.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Default edge color.
	pub edge: Color,
	/// Edges touching the focused node.
	pub edge_highlight: Color,
	/// Nodes outside an active highlight.
	pub node_dimmed: Color,
	/// Edges outside an active highlight.
	pub edge_dimmed: Color,
	/// Border color marking core nodes.
	pub core_border: Color,
}

impl Default for Theme {
	fn default() -> Self {
		let dim = Color::rgb(255, 255, 255);
		Self {
			edge: Color::rgb(0x55, 0x55, 0x55),
			edge_highlight: Color::rgb(59, 130, 246).with_alpha(0.8),
			node_dimmed: dim.with_alpha(0.2),
			edge_dimmed: dim.with_alpha(0.05),
			core_border: Color::rgb(0, 0, 0),
		}
	}
}
