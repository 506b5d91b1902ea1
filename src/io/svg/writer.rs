//! SVG writing operations.

use std::io::Write;

use anyhow::{Context, Result};

use crate::{io::svg::{category_class, category_color}, network::WalkCategory};

/// String-based SVG writer.
pub(crate) struct SvgStringWriter {
    buffer: Vec<u8>
}

impl Write for SvgStringWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
}

impl SvgStringWriter {
    pub(crate) fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub(crate) fn into_string(self) -> Result<String> {
        String::from_utf8(self.buffer)
            .context("[io::svg] SVG output is not valid UTF-8")
    }
}

/// Write the XML declaration, the opening <svg> tag and a white background.
/// The lon/lat bounds and scale are recorded as data attributes so a viewer can
/// map pixels back to coordinates.
pub(crate) fn write_svg_header<W: Write>(writer: &mut W, width: f64, height: f64, margin: f64, scale: f64, bounds: &geo::Rect) -> Result<()> {
    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg"
        width="{width:.0}" height="{height:.0}"
        viewBox="0 0 {width:.3} {height:.3}"
        data-lon-min="{lon_min}" data-lon-max="{lon_max}"
        data-lat-min="{lat_min}" data-lat-max="{lat_max}"
        data-margin="{margin}" data-scale="{scale}">"##,
        lon_min = bounds.min().x,
        lon_max = bounds.max().x,
        lat_min = bounds.min().y,
        lat_max = bounds.max().y,
    )?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    Ok(())
}

/// One stroke class per walkability category.
pub(crate) fn write_svg_styles<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "<defs>\n<style>")?;
    writeln!(writer, "    .seg {{ fill: none; stroke-width: 2; stroke-linecap: round; stroke-linejoin: round; vector-effect: non-scaling-stroke; }}")?;
    writeln!(writer, "    .legend {{ font: 12px sans-serif; fill: #111827; }}")?;
    for category in WalkCategory::order() {
        writeln!(writer, "    .{} {{ stroke: {}; }}", category_class(category), category_color(category))?;
    }
    writeln!(writer, "</style>\n</defs>")?;
    Ok(())
}

pub(crate) fn write_svg_footer<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use geo::{Rect, coord};

    use super::*;

    #[test]
    fn writes_a_complete_document() {
        let bounds = Rect::new(coord! { x: -61.5, y: 10.6 }, coord! { x: -61.3, y: 10.7 });
        let mut writer = SvgStringWriter::new();
        write_svg_header(&mut writer, 800.0, 410.0, 5.0, 3950.0, &bounds).unwrap();
        write_svg_styles(&mut writer).unwrap();
        write_svg_footer(&mut writer).unwrap();

        let svg = writer.into_string().unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"data-lon-min="-61.5""#));
        assert!(svg.contains(".cat-poor { stroke: rgb(255,165,0); }"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
