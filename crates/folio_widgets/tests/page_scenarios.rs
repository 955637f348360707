//! Whole-page scroll scenarios

use folio_animation::{HandlePhase, Preset};
use folio_core::document::DocumentHost;
use folio_widgets::{
    item_id, NavigationOutcome, Page, PageConfig, SectionLayout, SectionRevealConfig,
};
use std::cell::RefCell;
use std::rc::Rc;

const IDS: [&str; 6] = ["home", "about", "skills", "education", "projects", "contact"];

fn page(heights: &[f32], viewport_height: f32) -> Page {
    let sections = IDS
        .iter()
        .zip(heights)
        .map(|(id, height)| SectionLayout::new(*id, *height).headline(*id).items(2))
        .collect();
    Page::build(PageConfig {
        viewport_height,
        ..PageConfig::with_sections(sections)
    })
    .unwrap()
}

fn settle(page: &mut Page) {
    page.run_for(3000.0, 16.0);
}

#[test]
fn progress_is_half_way() {
    let mut page = page(&[1000.0; 5], 1000.0);
    assert_eq!(page.document().borrow().document_height(), 5000.0);

    page.user_scroll(2000.0);
    page.frame(16.0);
    assert_eq!(page.progress(), 0.5);
    assert_eq!(page.progress_bar().unwrap().fill_percent(), 50.0);
}

#[test]
fn probe_resolves_third_section() {
    let mut page = page(&[800.0; 6], 1000.0);
    page.user_scroll(1700.0);
    page.frame(16.0);
    assert_eq!(page.active_section(), "skills");
}

#[test]
fn scrolling_down_visits_sections_in_order() {
    let mut page = page(&[800.0, 800.0, 800.0, 800.0, 800.0, 1200.0], 1000.0);
    let visited = Rc::new(RefCell::new(vec![page.active_section()]));
    let sink = visited.clone();
    page.tracker()
        .on_change(move |id| sink.borrow_mut().push(id.to_string()));

    let mut y = 0.0;
    while y <= 4200.0 {
        page.user_scroll(y);
        page.frame(16.0);
        y += 50.0;
    }
    assert_eq!(*visited.borrow(), IDS);
}

#[test]
fn non_repeatable_reveal_plays_once() {
    let reveal = |repeatable| SectionRevealConfig {
        threshold: 0.2,
        repeatable,
        ..SectionRevealConfig::with_preset(Preset::FadeRise)
    };
    let mut page = Page::build(PageConfig {
        viewport_height: 1000.0,
        ..PageConfig::with_sections(vec![
            SectionLayout::new("home", 1000.0).static_section(),
            SectionLayout::new("once", 1000.0).items(3).reveal(reveal(false)),
            SectionLayout::new("again", 1000.0).items(3).reveal(reveal(true)),
        ])
    })
    .unwrap();
    assert_eq!(page.phase("once"), Some(HandlePhase::Armed));

    for _ in 0..3 {
        // Both sections cross the trigger line at 800px
        page.user_scroll(1300.0);
        page.frame(16.0);
        settle(&mut page);
        page.user_scroll(0.0);
        page.frame(16.0);
        settle(&mut page);
    }

    let once = page.reveal("once").unwrap().stats().unwrap();
    assert_eq!((once.plays, once.reversals), (1, 0));
    assert_eq!(page.phase("once"), Some(HandlePhase::Settled));
    assert_eq!(page.style_of(&item_id("once", 0)).unwrap().opacity, 1.0);

    let again = page.reveal("again").unwrap().stats().unwrap();
    assert_eq!((again.plays, again.reversals), (3, 3));
    assert_eq!(page.style_of(&item_id("again", 0)).unwrap().opacity, 0.0);
}

#[test]
fn unmounting_every_section_restores_subscribers() {
    let mut page = page(&[1000.0; 6], 1000.0);
    let mounted = page.observer().subscriber_count();
    for id in IDS {
        assert!(page.unmount_section(id));
    }
    assert_eq!(page.observer().subscriber_count(), mounted - IDS.len());
    assert_eq!(page.engine().intent_count(), 0);
}

#[test]
fn second_navigation_wins() {
    let mut page = page(&[800.0; 6], 1000.0);
    let first = page.navigate("contact");
    page.run_for(200.0, 16.0);
    let before = page.scroll_y();

    let second = page.navigate("contact");
    assert_eq!(first.outcome(), Some(NavigationOutcome::Interrupted));

    page.frame(16.0);
    assert!((page.scroll_y() - before).abs() < 100.0);

    assert!(page.run_until_finished(&second, 16.0, 5000.0));
    assert_eq!(second.outcome(), Some(NavigationOutcome::Completed));
    // 4000 - 80 lies past the end of a 4800px page
    assert_eq!(page.scroll_y(), 3800.0);
    page.frame(16.0);
    assert_eq!(page.active_section(), "projects");
}

#[test]
fn fragment_navigation_closes_menu() {
    let mut page = page(&[1000.0; 6], 1000.0);
    assert!(page.toggle_menu());

    let nav = page.navigate_to_fragment("#education");
    assert!(!page.is_menu_open());
    assert!(page.run_until_finished(&nav, 16.0, 5000.0));
    assert_eq!(page.scroll_y(), 2920.0);
    page.frame(16.0);
    assert_eq!(page.active_section(), "education");
    assert_eq!(page.indicator_state().active_section_id, "education");
}

#[test]
fn resize_refreshes_after_debounce() {
    let mut page = page(&[1000.0; 6], 1000.0);
    page.user_scroll(2000.0);
    page.frame(16.0);
    assert_eq!(page.progress(), 0.4);

    page.resize(1280.0, 2000.0);
    page.frame(16.0);
    page.run_for(200.0, 16.0);
    assert_eq!(page.progress(), 0.5);
}
