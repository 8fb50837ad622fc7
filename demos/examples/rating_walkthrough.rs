// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rating widget driven by a scripted sequence of host events.
//!
//! - Mounts one instance into an in-memory style sheet and prints the injected CSS.
//! - Hovers, clicks, drags by touch, and steps with the keyboard.
//! - Shows a controlled instance whose value only moves when the host updates it.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example rating_walkthrough`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_rating::inject::InstanceIds;
use understory_rating::input::{EventKind, Key};
use understory_rating::{Configuration, Rating, RatingValue, RawEvent, StyleSheet, ValueSource};

fn stars(rating: &Rating) -> String {
    rating
        .render()
        .segments
        .iter()
        .map(|s| {
            if s.variant.is_highlighted() {
                s.character
            } else {
                '☆'
            }
        })
        .collect()
}

fn show(label: &str, rating: &Rating) {
    let value = rating.value().map_or(0, RatingValue::get);
    println!("{label:<28} {}  value={value}", stars(rating));
}

fn seg(n: u8) -> RatingValue {
    RatingValue::new(n).unwrap()
}

fn main() {
    env_logger::init();

    let mut sheet = StyleSheet::new();
    let mut ids = InstanceIds::new();

    let mut rating = Rating::new(
        Configuration::new()
            .with_default_value(2)
            .with_attribute("id", "review-score")
            .on_change(|v| println!("  on_change -> {v:?}"))
            .on(EventKind::KeyDown, |e| println!("  listener saw {e:?}")),
    );
    rating.mount(ids.next_id(), &mut sheet);
    rating.set_wrapper_bounds(Rect::new(0.0, 0.0, 100.0, 20.0));
    print!("injected css:\n{}", sheet.to_css());

    show("initial", &rating);

    rating.handle_event(&RawEvent::PointerEnter { segment: seg(3) });
    rating.handle_event(&RawEvent::PointerEnter { segment: seg(5) });
    show("hover 3 then 5", &rating);
    rating.handle_event(&RawEvent::PointerLeave);
    show("pointer leave", &rating);

    rating.handle_event(&RawEvent::PointerDown);
    rating.handle_event(&RawEvent::Focus);
    rating.handle_event(&RawEvent::Click { segment: seg(4) });
    rating.handle_event(&RawEvent::PointerUp);
    show("click 4", &rating);

    rating.handle_event(&RawEvent::TouchStart {
        touches: [Point::new(10.0, 10.0)].into_iter().collect(),
    });
    rating.handle_event(&RawEvent::TouchMove {
        touches: [Point::new(30.0, 10.0)].into_iter().collect(),
    });
    show("touch drag to band 2", &rating);
    rating.handle_event(&RawEvent::TouchEnd);
    show("touch end", &rating);

    rating.handle_event(&RawEvent::Blur);
    rating.handle_event(&RawEvent::Focus);
    for name in ["ArrowRight", "ArrowRight", "Enter"] {
        let response = rating.handle_event(&RawEvent::KeyDown {
            key: Key::from_name(name),
        });
        println!("  {name}: prevent_default={}", response.default_prevented);
    }
    show("keyboard +2 and confirm", &rating);
    let wrapper = rating.render().wrapper;
    println!(
        "  wrapper class={:?} tabindex={} focus overlay={}",
        wrapper.class_name, wrapper.tab_index, wrapper.focus_overlay
    );

    rating.unmount(&mut sheet).expect("mounted above");
    println!("after unmount the sheet holds {} id(s)", sheet.len());

    // Controlled: the host keeps the value and feeds it back through `update`.
    let requested = Rc::new(Cell::new(Some(1_u8)));
    let sink = requested.clone();
    let linked = move |value: Option<u8>| {
        let sink = sink.clone();
        ValueSource::linked(value, move |v| sink.set(v.map(RatingValue::get)))
    };
    let mut controlled = Rating::new(Configuration::new().with_value(linked(requested.get())));
    controlled.mount(ids.next_id(), &mut sheet);
    controlled.handle_event(&RawEvent::Click { segment: seg(5) });
    show("controlled click 5", &controlled);
    let host_update = Configuration::new().with_value(linked(requested.get()));
    controlled.update(host_update, &mut sheet);
    show("controlled host update", &controlled);
    controlled.unmount(&mut sheet).expect("mounted above");
}
