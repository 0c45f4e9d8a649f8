//! Shared test utilities: a stock portfolio page on the in-memory host and
//! helpers that pump its frames, observers and timers.

#![allow(dead_code, unused_imports)]

use std::time::Duration;

use folio_motion::host::memory::{MemElement, MemoryHost};
use folio_motion::{ElementId, EventOutcome, HostEvent, MotionPreference, Page, PageConfig};

pub const VIEWPORT: f64 = 800.0;

/// Element handles of [`portfolio_host`].
pub struct Portfolio {
    pub navbar: ElementId,
    pub toggle: ElementId,
    pub menu: ElementId,
    pub about_link: ElementId,
    pub work_link: ElementId,
    pub contact_link: ElementId,
    pub hero: ElementId,
    pub hero_title: ElementId,
    pub about: ElementId,
    pub work: ElementId,
    pub contact: ElementId,
    pub stats: Vec<ElementId>,
}

impl Portfolio {
    pub fn sections(&self) -> [ElementId; 3] {
        [self.about, self.work, self.contact]
    }

    /// Every element the reveal trigger manages.
    pub fn reveal_elements(&self) -> [ElementId; 4] {
        [self.hero_title, self.about, self.work, self.contact]
    }
}

/// Navbar, hero with an animated title, three sections and three stats.
///
/// ```text
///    0 ┬ navbar (fixed) / hero          .hero #home
///  800 ┼ about   .section #about  (stats at 1000)
/// 1600 ┼ work    .section #work
/// 2600 ┼ contact .section #contact
/// 3200 ┴
/// ```
pub fn portfolio_host() -> (MemoryHost, Portfolio) {
    let mut host = MemoryHost::new().with_viewport_height(VIEWPORT);

    let navbar = host.add(MemElement::new("nav").with_class("navbar").at(0.0, 70.0));
    let toggle = host.add(
        MemElement::new("button")
            .with_class("nav-toggle")
            .inside(navbar),
    );
    let menu = host.add(MemElement::new("ul").with_class("nav-menu").inside(navbar));
    let link = |host: &mut MemoryHost, href: &str| {
        host.add(
            MemElement::new("a")
                .with_class("nav-link")
                .with_attr("href", href)
                .inside(menu),
        )
    };
    let about_link = link(&mut host, "#about");
    let work_link = link(&mut host, "#work");
    let contact_link = link(&mut host, "#contact");

    let hero = host.add(
        MemElement::new("header")
            .with_id("home")
            .with_class("hero")
            .at(0.0, 800.0),
    );
    let hero_title = host.add(
        MemElement::new("div")
            .with_class("reveal")
            .at(200.0, 100.0)
            .inside(hero),
    );

    let section = |host: &mut MemoryHost, id: &str, top: f64, height: f64| {
        host.add(
            MemElement::new("section")
                .with_id(id)
                .with_class("section")
                .at(top, height),
        )
    };
    let about = section(&mut host, "about", 800.0, 800.0);
    let stats = ["150+", "3.85", "12"]
        .iter()
        .map(|text| {
            host.add(
                MemElement::new("span")
                    .with_class("stat-number")
                    .with_text(text)
                    .at(1000.0, 50.0)
                    .inside(about),
            )
        })
        .collect();
    let work = section(&mut host, "work", 1600.0, 1000.0);
    let contact = section(&mut host, "contact", 2600.0, 600.0);

    (
        host,
        Portfolio {
            navbar,
            toggle,
            menu,
            about_link,
            work_link,
            contact_link,
            hero,
            hero_title,
            about,
            work,
            contact,
            stats,
        },
    )
}

/// Initializes the page and delivers the load-time frame and observer
/// reports.
pub fn boot(host: MemoryHost) -> Page<MemoryHost> {
    let mut page = Page::init(host, PageConfig::default());
    settle(&mut page);
    page
}

/// Delivers pending frames and intersection batches until none remain.
pub fn settle(page: &mut Page<MemoryHost>) {
    loop {
        let mut delivered = 0;
        let frame = page.host_mut().take_frame();
        if let Some(frame) = frame {
            page.dispatch(frame);
            delivered += 1;
        }
        let batches = page.host_mut().take_intersections();
        for batch in batches {
            page.dispatch(batch);
            delivered += 1;
        }
        if delivered == 0 {
            break;
        }
    }
}

/// Moves the viewport, sends one scroll notification and settles.
pub fn scroll_to(page: &mut Page<MemoryHost>, offset: f64) {
    page.host_mut().set_scroll_offset(offset);
    page.dispatch(HostEvent::Scroll { offset });
    settle(page);
}

/// Advances the virtual clock in 10 ms steps, delivering timers as they
/// come due.
pub fn advance(page: &mut Page<MemoryHost>, millis: u64) {
    for _ in 0..millis.div_ceil(10) {
        let due = page.host_mut().advance(Duration::from_millis(10));
        for event in due {
            page.dispatch(event);
        }
    }
}

pub fn click(page: &mut Page<MemoryHost>, target: ElementId) -> EventOutcome {
    page.dispatch(HostEvent::Click { target })
}

pub fn has_class(page: &Page<MemoryHost>, element: ElementId, class: &str) -> bool {
    page.host().element(element).has_class(class)
}

pub fn text(page: &Page<MemoryHost>, element: ElementId) -> String {
    page.host().element(element).text().to_string()
}
