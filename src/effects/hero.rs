use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use log::debug;
use web_sys::{Document, Element, FocusEvent, PointerEvent};

use crate::config::EnhanceConfig;
use crate::dom::{
    add_class, ensure_tabindex, find, find_all, listen, listen_passive, remove_class, report,
    set_style,
};
use crate::error::Result;

const LETTERS: &str = ".hover h1, h1 span, h1";
const FILL: &str = "fill";

/// Vertical drift of the hero at animation time `t`.
pub fn float_offset(t: f64, amplitude: f64) -> f64 {
    t.sin() * amplitude
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterTransform {
    pub tx: f64,
    pub ty: f64,
    pub rz: f64,
}

impl LetterTransform {
    pub fn css(&self) -> String {
        format!(
            "translate({}px, {}px) rotate({}deg)",
            self.tx, self.ty, self.rz
        )
    }
}

/// Offset for a letter centred at `centre` when the pointer is at `pointer`.
/// Falls off linearly to zero at `radius`.
pub fn parallax(
    pointer: (f64, f64),
    centre: (f64, f64),
    radius: f64,
    strength: f64,
) -> LetterTransform {
    let dx = pointer.0 - centre.0;
    let dy = pointer.1 - centre.1;
    let dist = (dx * dx + dy * dy).sqrt();
    let falloff = ((radius - dist) / radius).max(0.0);
    LetterTransform {
        tx: dx / radius * strength * falloff,
        ty: dy / radius * strength * falloff,
        rz: dx / radius * strength * falloff,
    }
}

pub fn install(document: &Document, config: &EnhanceConfig) -> Result<()> {
    let Some(hero) = document.get_element_by_id(&config.selectors.hero_id) else {
        return Ok(());
    };

    start_float(hero.clone(), config);

    let Some(container) =
        find(&hero, &config.selectors.hero_container).or_else(|| find(&hero, "h1"))
    else {
        return Ok(());
    };

    let letters = Rc::new(find_all(&container, LETTERS));
    debug!("hero: {} letters", letters.len());

    {
        let letters = letters.clone();
        let radius = config.parallax_radius;
        let strength = config.parallax_strength;
        listen_passive(&container, "pointermove", move |event: PointerEvent| {
            let pointer = (event.client_x() as f64, event.client_y() as f64);
            for letter in letters.iter() {
                let rect = letter.get_bounding_client_rect();
                let centre = (
                    rect.left() + rect.width() / 2.0,
                    rect.top() + rect.height() / 2.0,
                );
                let transform = parallax(pointer, centre, radius, strength);
                report("hero", set_style(letter, "transform", &transform.css()));
            }
        })?;
    }

    listen(&container, "pointerleave", move |_: PointerEvent| {
        for letter in letters.iter() {
            report("hero", set_style(letter, "transform", "none"));
        }
    })?;

    for block in find_all(&container, &config.selectors.hover_block) {
        ensure_tabindex(&block)?;
        let Some(heading) = find(&block, "h1") else {
            continue;
        };
        toggle_fill(&block, &heading)?;
    }

    Ok(())
}

fn start_float(hero: Element, config: &EnhanceConfig) {
    let t = Cell::new(0.0);
    let step = config.float_step;
    let amplitude = config.float_amplitude;
    Interval::new(config.float_interval_ms, move || {
        t.set(t.get() + step);
        let offset = float_offset(t.get(), amplitude);
        report(
            "hero",
            set_style(&hero, "transform", &format!("translateY({}px)", offset)),
        );
    })
    .forget();
}

fn toggle_fill(block: &Element, heading: &Element) -> Result<()> {
    for kind in ["pointerenter", "pointerleave"] {
        let heading = heading.clone();
        let enter = kind == "pointerenter";
        listen(block, kind, move |_: PointerEvent| set_fill(&heading, enter))?;
    }
    for kind in ["focus", "blur"] {
        let heading = heading.clone();
        let enter = kind == "focus";
        listen(block, kind, move |_: FocusEvent| set_fill(&heading, enter))?;
    }
    Ok(())
}

fn set_fill(heading: &Element, on: bool) {
    let result = if on {
        add_class(heading, FILL)
    } else {
        remove_class(heading, FILL)
    };
    report("hero", result);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_stays_within_amplitude() {
        assert_eq!(float_offset(0.0, 2.0), 0.0);
        assert!((float_offset(std::f64::consts::FRAC_PI_2, 2.0) - 2.0).abs() < 1e-9);
        for i in 0..1000 {
            assert!(float_offset(i as f64 * 0.01, 2.0).abs() <= 2.0);
        }
    }

    #[test]
    fn pointer_on_centre_leaves_letter_still() {
        let t = parallax((50.0, 50.0), (50.0, 50.0), 120.0, 6.0);
        assert_eq!(t, LetterTransform { tx: 0.0, ty: 0.0, rz: 0.0 });
    }

    #[test]
    fn pointer_outside_radius_has_no_effect() {
        let t = parallax((300.0, 0.0), (0.0, 0.0), 120.0, 6.0);
        assert_eq!(t.tx, 0.0);
        assert_eq!(t.ty, 0.0);
        assert_eq!(t.rz, 0.0);
    }

    #[test]
    fn pointer_inside_radius_pulls_towards_pointer() {
        // dx = 60 -> half the radius, falloff 0.5
        let t = parallax((60.0, 0.0), (0.0, 0.0), 120.0, 6.0);
        assert!((t.tx - 1.5).abs() < 1e-9);
        assert_eq!(t.ty, 0.0);
        assert!((t.rz - 1.5).abs() < 1e-9);

        let t = parallax((0.0, -60.0), (0.0, 0.0), 120.0, 6.0);
        assert!((t.ty + 1.5).abs() < 1e-9);
        assert_eq!(t.rz, 0.0);
    }

    #[test]
    fn css_formats_translate_and_rotate() {
        let t = LetterTransform { tx: 1.5, ty: -2.0, rz: 0.25 };
        assert_eq!(t.css(), "translate(1.5px, -2px) rotate(0.25deg)");
    }
}
