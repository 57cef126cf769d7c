//! In-memory TrueType font for tests
//!
//! Four glyphs at 1000 units per em:
//!
//! | id | char | outline                  | advance |
//! |----|------|--------------------------|---------|
//! | 0  |      | none (.notdef)           | 500     |
//! | 1  | `A`  | square 50..550 x 0..700  | 600     |
//! | 2  | `V`  | triangle, same box       | 600     |
//! | 3  | ` `  | none                     | 250     |
//!
//! The pair `A V` is kerned by -80 units. Vertical metrics are ascender
//! 800, descender -200 and line gap 100. The `post` table places the
//! underline at -100 with thickness 50.

/// Family name stored in the `name` table
pub const FAMILY: &str = "Fixture Sans";

/// Design units per em
pub const UNITS_PER_EM: f32 = 1000.0;

/// Kerning between `A` and `V` in design units
pub const KERNING_UNITS: f32 = -80.0;

/// Ascender - descender + line gap, in design units
pub const LINE_SPACING_UNITS: f32 = 1100.0;

/// Underline position (positive below the baseline) in design units
pub const UNDERLINE_POSITION_UNITS: f32 = 100.0;

/// Underline thickness in design units
pub const UNDERLINE_THICKNESS_UNITS: f32 = 50.0;

/// Complete font bytes
pub fn build() -> Vec<u8> {
    assemble(true)
}

/// Font bytes without a `post` table, so no underline metrics
pub fn build_without_underline() -> Vec<u8> {
    assemble(false)
}

#[derive(Default)]
struct Writer(Vec<u8>);

impl Writer {
    fn u16(&mut self, value: u16) -> &mut Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn i16(&mut self, value: i16) -> &mut Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn u32(&mut self, value: u32) -> &mut Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn bytes(&mut self, value: &[u8]) -> &mut Self {
        self.0.extend_from_slice(value);
        self
    }

    fn pad4(&mut self) -> &mut Self {
        while self.0.len() % 4 != 0 {
            self.0.push(0);
        }
        self
    }

    fn finish(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.0)
    }
}

fn assemble(include_post: bool) -> Vec<u8> {
    let (glyf, loca) = glyf_and_loca();
    let mut tables: Vec<(&[u8; 4], Vec<u8>)> = vec![
        (b"cmap", cmap()),
        (b"glyf", glyf),
        (b"head", head()),
        (b"hhea", hhea()),
        (b"hmtx", hmtx()),
        (b"kern", kern()),
        (b"loca", loca),
        (b"maxp", maxp()),
        (b"name", name()),
    ];
    if include_post {
        tables.push((b"post", post()));
    }

    let num_tables = tables.len() as u16;
    let entry_selector = 15 - num_tables.leading_zeros() as u16;
    let search_range = (1u16 << entry_selector) * 16;

    let mut font = Writer::default();
    font.u32(0x0001_0000)
        .u16(num_tables)
        .u16(search_range)
        .u16(entry_selector)
        .u16(num_tables * 16 - search_range);

    let mut offset = 12 + 16 * tables.len();
    for (tag, data) in &tables {
        font.bytes(&tag[..])
            .u32(checksum(data))
            .u32(offset as u32)
            .u32(data.len() as u32);
        offset += data.len().next_multiple_of(4);
    }
    for (_, data) in &tables {
        font.bytes(data).pad4();
    }
    font.finish()
}

fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

fn head() -> Vec<u8> {
    Writer::default()
        .u16(1)
        .u16(0)
        .u32(0x0001_0000) // font revision
        .u32(0) // checksum adjustment
        .u32(0x5F0F_3CF5)
        .u16(0) // flags
        .u16(UNITS_PER_EM as u16)
        .bytes(&[0; 16]) // created, modified
        .i16(0)
        .i16(0)
        .i16(550)
        .i16(700)
        .u16(0) // mac style
        .u16(8) // lowest rec ppem
        .i16(2) // direction hint
        .i16(1) // long loca offsets
        .i16(0)
        .finish()
}

fn hhea() -> Vec<u8> {
    Writer::default()
        .u32(0x0001_0000)
        .i16(800)
        .i16(-200)
        .i16(100)
        .u16(600) // advance width max
        .i16(0)
        .i16(0)
        .i16(550) // x max extent
        .i16(1) // caret slope rise
        .i16(0)
        .i16(0)
        .bytes(&[0; 8])
        .i16(0) // metric data format
        .u16(4)
        .finish()
}

fn maxp() -> Vec<u8> {
    Writer::default().u32(0x0000_5000).u16(4).finish()
}

fn hmtx() -> Vec<u8> {
    Writer::default()
        .u16(500)
        .i16(0)
        .u16(600)
        .i16(50)
        .u16(600)
        .i16(50)
        .u16(250)
        .i16(0)
        .finish()
}

fn cmap() -> Vec<u8> {
    let groups: [(u32, u32); 3] = [(0x20, 3), (0x41, 1), (0x56, 2)];
    let mut cmap = Writer::default();
    cmap.u16(0)
        .u16(1)
        .u16(3) // windows
        .u16(10) // full unicode
        .u32(12)
        .u16(12) // format 12
        .u16(0)
        .u32(16 + 12 * groups.len() as u32)
        .u32(0)
        .u32(groups.len() as u32);
    for (code_point, glyph) in groups {
        cmap.u32(code_point).u32(code_point).u32(glyph);
    }
    cmap.finish()
}

/// Simple glyph with one contour of on-curve points and word-sized deltas
fn simple_glyph(points: &[(i16, i16)]) -> Vec<u8> {
    let x_min = points.iter().map(|p| p.0).min().unwrap_or(0);
    let y_min = points.iter().map(|p| p.1).min().unwrap_or(0);
    let x_max = points.iter().map(|p| p.0).max().unwrap_or(0);
    let y_max = points.iter().map(|p| p.1).max().unwrap_or(0);

    let mut glyph = Writer::default();
    glyph
        .i16(1)
        .i16(x_min)
        .i16(y_min)
        .i16(x_max)
        .i16(y_max)
        .u16(points.len() as u16 - 1)
        .u16(0); // no instructions
    for _ in points {
        glyph.bytes(&[0x01]);
    }
    let mut previous = 0;
    for &(x, _) in points {
        glyph.i16(x - previous);
        previous = x;
    }
    let mut previous = 0;
    for &(_, y) in points {
        glyph.i16(y - previous);
        previous = y;
    }
    glyph.pad4().finish()
}

fn glyf_and_loca() -> (Vec<u8>, Vec<u8>) {
    let outlines = [
        Vec::new(),
        simple_glyph(&[(50, 0), (50, 700), (550, 700), (550, 0)]),
        simple_glyph(&[(50, 700), (550, 700), (300, 0)]),
        Vec::new(),
    ];

    let mut glyf = Writer::default();
    let mut loca = Writer::default();
    for outline in &outlines {
        loca.u32(glyf.0.len() as u32);
        glyf.bytes(outline);
    }
    loca.u32(glyf.0.len() as u32);
    (glyf.finish(), loca.finish())
}

fn kern() -> Vec<u8> {
    Writer::default()
        .u16(0)
        .u16(1)
        .u16(0) // subtable version
        .u16(20) // subtable length
        .u16(0x0001) // horizontal, format 0
        .u16(1) // pairs
        .u16(6)
        .u16(0)
        .u16(0)
        .u16(1)
        .u16(2)
        .i16(KERNING_UNITS as i16)
        .finish()
}

fn name() -> Vec<u8> {
    let encode = |s: &str| -> Vec<u8> { s.encode_utf16().flat_map(u16::to_be_bytes).collect() };
    let strings = [(1u16, encode(FAMILY)), (4u16, encode("Fixture Sans Regular"))];

    let mut table = Writer::default();
    table.u16(0).u16(strings.len() as u16).u16(6 + 12 * strings.len() as u16);
    let mut offset = 0u16;
    for (name_id, data) in &strings {
        table
            .u16(3)
            .u16(1)
            .u16(0x0409)
            .u16(*name_id)
            .u16(data.len() as u16)
            .u16(offset);
        offset += data.len() as u16;
    }
    for (_, data) in &strings {
        table.bytes(data);
    }
    table.finish()
}

fn post() -> Vec<u8> {
    Writer::default()
        .u32(0x0003_0000)
        .u32(0) // italic angle
        .i16(-(UNDERLINE_POSITION_UNITS as i16))
        .i16(UNDERLINE_THICKNESS_UNITS as i16)
        .u32(0)
        .bytes(&[0; 16])
        .finish()
}

#[test]
fn test_fixture_parses() {
    let data = build();
    let face = ttf_parser::Face::parse(&data, 0).unwrap();

    assert_eq!(face.number_of_glyphs(), 4);
    assert_eq!(face.units_per_em(), 1000);
    assert_eq!(face.glyph_index('A'), Some(ttf_parser::GlyphId(1)));
    assert_eq!(face.glyph_index('V'), Some(ttf_parser::GlyphId(2)));
    assert_eq!(face.glyph_hor_advance(ttf_parser::GlyphId(3)), Some(250));
    assert!(face.underline_metrics().is_some());
    assert!(ttf_parser::Face::parse(&build_without_underline(), 0)
        .unwrap()
        .underline_metrics()
        .is_none());
}
