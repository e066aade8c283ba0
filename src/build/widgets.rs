//! Special-widget synthesizers: buttons (plain, checkbox, radio) and the
//! slider / progress-bar pair. Each builds a self-contained pseudo-component
//! document around the node's children and registers it as a resource.

use crate::classify::{BUTTON_STATE_MARKERS, is_check_button, is_radio_button};
use crate::design::DesignNode;
use crate::element::Element;
use crate::error::Result;
use crate::package::{ControllerTable, ResourceHandle, ResourceKind};

use super::BuildContext;
use super::walker::{parse_node, size_of};

/// Synthesize a button component from a group node.
///
/// Descendant layers tagged `@up` / `@down` become state art geared to a
/// two-page `button` controller. A state without its own art shows the `up`
/// art instead. `@title` and `@icon` descendants surface their text / icon
/// url as instance properties appended to `inst_props`; the walker attaches
/// those to the button's placement.
pub(crate) fn build_button(
    ctx: &mut BuildContext,
    node: &DesignNode,
    inst_props: &mut Vec<(String, String)>,
    controllers: &mut ControllerTable,
) -> Result<ResourceHandle> {
    let mut component = Element::new("component")
        .att("size", size_of(node))
        // `extention` is the package format's own spelling
        .att("extention", "Button");

    let descendants = node.descendants();
    let mut state_art: Vec<Option<&DesignNode>> = vec![None; BUTTON_STATE_MARKERS.len()];
    let mut art_count = 0;
    for layer in &descendants {
        for (state, marker) in BUTTON_STATE_MARKERS.iter().enumerate() {
            if layer.name.contains(marker) {
                state_art[state] = Some(layer);
                art_count += 1;
            }
        }
    }

    // Controller page sets per state image. A state lacking art borrows the
    // `up` art; a four-state source would borrow `down` for the
    // selected-over slot, which stays expressed here even though only two
    // states are tracked.
    let mut gear_pages: Vec<Vec<usize>> = vec![Vec::new(); BUTTON_STATE_MARKERS.len()];
    for state in 0..BUTTON_STATE_MARKERS.len() {
        if state_art[state].is_some() {
            gear_pages[state].push(state);
        } else if state == 3 && state_art[1].is_some() {
            gear_pages[1].push(state);
        } else {
            gear_pages[0].push(state);
        }
    }

    component.push(
        Element::new("controller")
            .att("name", "button")
            .att("pages", "0,up,1,down"),
    );

    let mut display_list = Vec::new();
    {
        let mut on_element = |el: &mut Element, src: &DesignNode| {
            if let Some(state) = state_art
                .iter()
                .position(|art| art.is_some_and(|art| std::ptr::eq(art, src)))
            {
                let pages: Vec<String> =
                    gear_pages[state].iter().map(|p| p.to_string()).collect();
                el.push(
                    Element::new("gearDisplay")
                        .att("controller", "button")
                        .att("pages", pages.join(",")),
                );
            }

            if src.name.contains("@title") {
                if let Some(text) = el.attr("text") {
                    inst_props.push(("@title".to_string(), text.to_string()));
                }
            } else if src.name.contains("@icon")
                && let Some(url) = el.attr("url")
            {
                // the icon is driven by the button's own icon property from
                // here on
                inst_props.push(("@icon".to_string(), url.to_string()));
                el.remove_att("url");
            }
        };
        for child in node.children().iter().rev() {
            parse_node(
                ctx,
                child,
                node,
                node,
                &mut display_list,
                Some(&mut on_element),
                controllers,
                None,
            )?;
        }
    }

    let mut dl = Element::new("displayList");
    for el in display_list {
        dl.push(el);
    }
    component.push(dl);

    let name = node.name.as_str();
    let mut extension = Element::new("Button");
    if is_check_button(name) {
        extension.set_att("mode", "Check");
        inst_props.push(("@checked".to_string(), "true".to_string()));
    } else if is_radio_button(name) {
        extension.set_att("mode", "Radio");
    }
    if art_count == 1 && !is_check_button(name) {
        extension.set_att("downEffect", "scale");
        extension.set_att("downEffectValue", "0.95");
    }
    component.push(extension);

    let xml = component.to_xml();
    Ok(ctx.registry.register(
        ResourceKind::Component,
        &format!("{}.xml", node.name),
        None,
        xml.into_bytes(),
        false,
    ))
}

/// Synthesize a slider component: children form the display list, with the
/// grip geared to track the bar's right edge.
pub(crate) fn build_slider(ctx: &mut BuildContext, node: &DesignNode) -> Result<ResourceHandle> {
    build_track_component(ctx, node, false)
}

/// Synthesize a progress-bar component. Same track wiring as the slider,
/// plus a hidden-overflow container.
pub(crate) fn build_progress_bar(
    ctx: &mut BuildContext,
    node: &DesignNode,
) -> Result<ResourceHandle> {
    build_track_component(ctx, node, true)
}

fn build_track_component(
    ctx: &mut BuildContext,
    node: &DesignNode,
    progress: bool,
) -> Result<ResourceHandle> {
    let mut component = Element::new("component").att("size", size_of(node));
    if progress {
        component.set_att("overflow", "hidden");
        component.set_att("extention", "ProgressBar");
    } else {
        component.set_att("extention", "Slider");
    }

    let mut display_list = Vec::new();
    // radio groups inside a track widget keep their controllers local to it
    let mut local_controllers = ControllerTable::new();
    for child in node.children().iter().rev() {
        parse_node(
            ctx,
            child,
            node,
            node,
            &mut display_list,
            None,
            &mut local_controllers,
            None,
        )?;
    }

    wire_grip_to_bar(&mut display_list);

    let mut dl = Element::new("displayList");
    for el in display_list {
        dl.push(el);
    }
    component.push(dl);

    // the runtime's slider renderer backs both widgets; the extension body
    // stays Slider-tagged even for progress bars
    component.push(Element::new("Slider"));

    let xml = component.to_xml();
    Ok(ctx.registry.register(
        ResourceKind::Component,
        &format!("{}.xml", node.name),
        None,
        xml.into_bytes(),
        false,
    ))
}

/// Attach the grip-tracks-bar relation: every `grip` element gets a
/// `relation` targeting the `bar` element's id with `sidePair
/// right-right`. The grip may be emitted before or after the bar; wiring
/// happens once both are known, so the result is independent of traversal
/// order.
fn wire_grip_to_bar(display_list: &mut [Element]) {
    let bar_id = display_list
        .iter()
        .find(|el| el.attr("name") == Some("bar"))
        .and_then(|el| el.attr("id"))
        .map(str::to_owned);
    let Some(bar_id) = bar_id else {
        return;
    };
    for el in display_list.iter_mut() {
        if el.attr("name") == Some("grip") {
            el.push(
                Element::new("relation")
                    .att("target", &bar_id)
                    .att("sidePair", "right-right"),
            );
        }
    }
}
