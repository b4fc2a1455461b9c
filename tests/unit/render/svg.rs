use super::*;

fn page() -> PageSize {
    PageSize {
        width: 100.0,
        height: 50.0,
    }
}

#[test]
fn into_svg_wraps_the_body_in_a_sized_document() {
    let surface = SvgSurface::new(page());
    let svg = surface.into_svg();

    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.contains(" width=\"100\" height=\"50\" viewBox=\"0 0 100 50\">"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn rects_emit_position_size_and_stroke() {
    let mut surface = SvgSurface::new(page());
    surface
        .draw_rect(
            Rect::new(10.0, 20.0, 40.0, 60.0),
            Rgb::new(0.0, 0.0, 0.0),
            Rgb::new(1.0, 1.0, 1.0),
            3.0,
        )
        .unwrap();

    let svg = surface.into_svg();
    assert!(svg.contains(
        "<rect x=\"10\" y=\"20\" width=\"30\" height=\"40\" \
         fill=\"#ffffff\" stroke=\"#000000\" stroke-width=\"3\"/>"
    ));
}

#[test]
fn zero_width_strokes_are_omitted() {
    let mut surface = SvgSurface::new(page());
    surface
        .draw_rect(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Rgb::new(0.0, 0.0, 0.0),
            Rgb::new(1.0, 1.0, 1.0),
            0.0,
        )
        .unwrap();

    assert!(!surface.into_svg().contains("stroke"));
}

#[test]
fn text_carries_font_colour_and_escaped_content() {
    let mut surface = SvgSurface::new(page());
    surface.set_font(&FontSpec::new("Helvetica", 16.0).bold().italic());
    surface.set_color(Rgb::new(0.4, 0.4, 0.4));
    surface.draw_text(Point::new(5.0, 7.0), "A & B <ok>").unwrap();

    let svg = surface.into_svg();
    assert!(svg.contains("<text x=\"5\" y=\"7\""));
    assert!(svg.contains(" font-family=\"'Helvetica', sans-serif\""));
    assert!(svg.contains(" font-size=\"16\""));
    assert!(svg.contains(" font-weight=\"bold\""));
    assert!(svg.contains(" font-style=\"italic\""));
    assert!(svg.contains(" fill=\"#666666\""));
    assert!(svg.contains(">A &amp; B &lt;ok&gt;</text>"));
}

#[test]
fn rotation_applies_per_text_anchor_and_cancels() {
    let mut surface = SvgSurface::new(page());
    surface.rotate(-std::f64::consts::FRAC_PI_2);
    surface.draw_text(Point::new(5.0, 7.0), "up").unwrap();
    surface.rotate(std::f64::consts::FRAC_PI_2);
    surface.draw_text(Point::new(5.0, 7.0), "flat").unwrap();

    let svg = surface.into_svg();
    assert!(svg.contains("transform=\"rotate(-90 5 7)\""));
    assert_eq!(svg.matches("transform=").count(), 1);
}

#[test]
fn finished_surfaces_refuse_further_drawing() {
    let mut surface = SvgSurface::new(page());
    surface.finish_page().unwrap();

    let err = surface.draw_text(Point::new(0.0, 0.0), "late").unwrap_err();
    assert!(matches!(err, LifegridError::Validation(_)), "{err}");

    let err = surface
        .draw_rect(
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Rgb::new(0.0, 0.0, 0.0),
            Rgb::new(0.0, 0.0, 0.0),
            0.0,
        )
        .unwrap_err();
    assert!(matches!(err, LifegridError::Validation(_)), "{err}");
}

#[test]
fn coords_drop_trailing_zeros() {
    assert_eq!(fmt_coord(12.0), "12");
    assert_eq!(fmt_coord(12.3), "12.3");
    assert_eq!(fmt_coord(217.5), "217.5");
    assert_eq!(fmt_coord(0.0), "0");
    assert_eq!(fmt_coord(-0.001), "0");
    assert_eq!(fmt_coord(-90.0), "-90");
}

#[test]
fn xml_escape_covers_the_five_entities() {
    assert_eq!(xml_escape("a&b<c>d\"e'f"), "a&amp;b&lt;c&gt;d&quot;e&apos;f");
    assert_eq!(xml_escape("plain"), "plain");
}
