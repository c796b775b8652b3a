//! Text rendering of segment patterns.

use std::io::Write;

use anyhow::Result;
use segment_display::{decode, Nibble, Segment, SegmentPattern, TripleDigitController};
use segment_display::{ControllerConfig, ValueRegister};

/// Three text rows per digit, digits separated by one space.
///
/// ```text
///  _       _
/// |_|   | |_
/// | |   | |_|
/// ```
pub fn render(patterns: &[SegmentPattern]) -> String {
    let lit = |p: &SegmentPattern, s: Segment, c: char| if p.is_lit(s) { c } else { ' ' };
    let mut rows = [String::new(), String::new(), String::new()];
    for (i, p) in patterns.iter().enumerate() {
        if i > 0 {
            rows.iter_mut().for_each(|row| row.push(' '));
        }
        let [top, middle, bottom] = &mut rows;
        top.extend([' ', lit(p, Segment::A, '_'), ' ']);
        middle.extend([
            lit(p, Segment::F, '|'),
            lit(p, Segment::G, '_'),
            lit(p, Segment::B, '|'),
        ]);
        bottom.extend([
            lit(p, Segment::E, '|'),
            lit(p, Segment::D, '_'),
            lit(p, Segment::C, '|'),
        ]);
    }
    rows.iter()
        .map(|row| row.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `segsim show`: what a viewer sees for `value`.
pub fn show(value: u32, out: &mut impl Write) -> Result<()> {
    let register = ValueRegister::<3>::new("value");
    register.write(value);
    let ctrl = TripleDigitController::new(&ControllerConfig::default(), &register)?;
    writeln!(out, "value = {:#05x}", register.read())?;
    writeln!(out, "{}", render(&ctrl.snapshot()))?;
    Ok(())
}

/// `segsim table`: decoder table.
pub fn table(out: &mut impl Write) -> Result<()> {
    writeln!(out, "nibble  gfedcba")?;
    for n in 0..=Nibble::MASK {
        let nibble = Nibble::new(n)?;
        writeln!(out, "{:#x}     {}", n, decode(nibble))?;
    }
    Ok(())
}
