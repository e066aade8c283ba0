//! Recursive walk over the design tree: classify each node by name and
//! grouping, delegate to the matching synthesizer, and append placement
//! elements to the enclosing component's display list.
//!
//! Children are visited in reverse order so the emitted display list
//! matches rendering stack order. Classification never fails; names that
//! match no convention fall through to transparent grouping or plain
//! image/text placement.

use crate::classify::{
    GroupKind, SpecialUsage, classify_group, controller_name, is_radio_button, label_before_at,
    special_usage,
};
use crate::design::{DesignNode, TextAlign};
use crate::element::Element;
use crate::error::Result;
use crate::package::{ControllerTable, ResourceHandle, ResourceKind};
use crate::util::html_color;

use super::{BuildContext, ExportOptions, widgets};

/// Post-construction hook a synthesizer can attach to the walk; invoked
/// with each in-progress placement element and its source node.
pub(crate) type ElementCallback<'a, 'f> = &'a mut (dyn FnMut(&mut Element, &DesignNode) + 'f);

/// Position of a node relative to a component root, as an `xy` attribute.
pub(crate) fn xy_of(node: &DesignNode, root: &DesignNode) -> String {
    format!(
        "{},{}",
        node.bounds.left - root.bounds.left,
        node.bounds.top - root.bounds.top
    )
}

/// A node's size as a `size` attribute.
pub(crate) fn size_of(node: &DesignNode) -> String {
    format!("{},{}", node.bounds.width, node.bounds.height)
}

/// Convert a group node into a self-contained component document and
/// register it. `name_override` replaces the node's own name for the
/// top-level conversion entry; `top_level` stores the document at the
/// package root instead of `Components/`.
pub(crate) fn build_component(
    ctx: &mut BuildContext,
    node: &DesignNode,
    name_override: Option<&str>,
    top_level: bool,
) -> Result<ResourceHandle> {
    let mut component = Element::new("component").att("size", size_of(node));

    let mut display_list = Vec::new();
    let mut controllers = ControllerTable::new();
    for child in node.children().iter().rev() {
        parse_node(
            ctx,
            child,
            node,
            node,
            &mut display_list,
            None,
            &mut controllers,
            None,
        )?;
    }

    let mut dl = Element::new("displayList");
    for el in display_list {
        dl.push(el);
    }
    component.push(dl);

    for (name, pages) in controllers.iter() {
        component.push(
            Element::new("controller")
                .att("name", name)
                .att("pages", ControllerTable::flatten_pages(pages))
                .att("selected", "0"),
        );
    }

    let file_name = format!("{}.xml", name_override.unwrap_or(&node.name));
    let xml = component.to_xml();
    Ok(ctx
        .registry
        .register(ResourceKind::Component, &file_name, None, xml.into_bytes(), top_level))
}

/// Classify one node and append its placement (if any) to `display_list`,
/// recursing into children as needed.
///
/// `parent` is the node's immediate group (controller names for radio
/// buttons derive from it), `root` the enclosing component (placement
/// coordinates are relative to it). `radio_pages` is the enclosing radio
/// group's ordered label list, present only for its direct children.
#[allow(clippy::too_many_arguments)]
pub(crate) fn parse_node(
    ctx: &mut BuildContext,
    node: &DesignNode,
    parent: &DesignNode,
    root: &DesignNode,
    display_list: &mut Vec<Element>,
    mut on_element: Option<ElementCallback<'_, '_>>,
    controllers: &mut ControllerTable,
    mut radio_pages: Option<&mut Vec<String>>,
) -> Result<()> {
    let name = node.name.as_str();
    let usage = special_usage(name);

    let mut child: Option<Element> = None;

    if node.is_group() {
        match classify_group(name) {
            GroupKind::Component => {
                let item = build_component(ctx, node, None, false)?;
                let slot = format!("n{}", display_list.len() + 1);
                child = Some(
                    Element::new("component")
                        .att("id", format!("{}_{}", slot, ctx.item_id_base))
                        .att("name", usage.map(SpecialUsage::as_str).unwrap_or(&slot))
                        .att("src", &item.id)
                        .att("fileName", &item.name)
                        .att("xy", xy_of(node, root)),
                );
            }
            GroupKind::Button => {
                let mut inst_props: Vec<(String, String)> = Vec::new();
                let item = widgets::build_button(ctx, node, &mut inst_props, controllers)?;

                let slot = if is_radio_button(name) {
                    // Radio buttons join their parent group's controller
                    // instead of standing alone: resolve the controller
                    // name from the parent, take the next page index, and
                    // contribute a page label.
                    let ctrl = controller_name(&parent.name, controllers.len());
                    inst_props.push(("@controller".to_string(), ctrl));
                    let page = radio_pages.as_deref().map_or(0, |p| p.len());
                    inst_props.push(("@page".to_string(), page.to_string()));

                    let label = label_before_at(name)
                        .map(str::to_owned)
                        .unwrap_or_else(|| format!("n{}", display_list.len() + 1));
                    if let Some(pages) = radio_pages.as_deref_mut() {
                        pages.push(label.clone());
                    }
                    label
                } else {
                    name.to_string()
                };

                let mut el = Element::new("component")
                    .att("id", format!("{}_{}", slot, ctx.item_id_base))
                    .att("name", usage.map(SpecialUsage::as_str).unwrap_or(&slot))
                    .att("src", &item.id)
                    .att("fileName", &item.name)
                    .att("xy", xy_of(node, root));
                if usage != Some(SpecialUsage::Grip) {
                    let mut props = Element::new("Button");
                    for (key, value) in inst_props {
                        props.set_att(key, value);
                    }
                    el.push(props);
                }
                child = Some(el);
            }
            GroupKind::ProgressBar => {
                let item = widgets::build_progress_bar(ctx, node)?;
                let slot = format!("n{}", display_list.len() + 1);
                let mut el = Element::new("component")
                    .att("id", format!("{}_{}", slot, ctx.item_id_base))
                    .att("name", usage.map(SpecialUsage::as_str).unwrap_or(&slot))
                    .att("src", &item.id)
                    .att("fileName", &item.name)
                    .att("xy", xy_of(node, root));
                el.push(Element::new("ProgressBar"));
                child = Some(el);
            }
            GroupKind::Slider => {
                let item = widgets::build_slider(ctx, node)?;
                let slot = format!("n{}", display_list.len() + 1);
                let mut el = Element::new("component")
                    .att("id", format!("{}_{}", slot, ctx.item_id_base))
                    .att("name", usage.map(SpecialUsage::as_str).unwrap_or(&slot))
                    .att("src", &item.id)
                    .att("fileName", &item.name)
                    .att("xy", xy_of(node, root));
                el.push(Element::new("Slider"));
                child = Some(el);
            }
            GroupKind::RadioGroup => {
                // The container itself places nothing; its children flatten
                // into the enclosing display list while collecting ordered
                // page labels for one controller entry.
                let mut pages = Vec::new();
                for c in node.children().iter().rev() {
                    parse_node(
                        ctx,
                        c,
                        node,
                        root,
                        display_list,
                        on_element.as_deref_mut(),
                        controllers,
                        Some(&mut pages),
                    )?;
                }
                let ctrl = controller_name(name, controllers.len());
                controllers.insert(ctrl, pages);
            }
            GroupKind::Plain => {
                for c in node.children().iter().rev() {
                    parse_node(
                        ctx,
                        c,
                        node,
                        root,
                        display_list,
                        on_element.as_deref_mut(),
                        controllers,
                        None,
                    )?;
                }
            }
        }
    } else if let Some(text) = node.text_data() {
        // A tagged text layer is named by the part before its marker; an
        // untagged one keeps its own name. Either way, only names with the
        // literal `Txt` suffix survive as element names.
        let txt_name: &str = if usage.is_some() {
            name.rfind("@title").map(|i| &name[..i]).unwrap_or("")
        } else {
            name
        };
        let slot = if txt_name.ends_with("Txt") {
            txt_name.to_string()
        } else {
            format!("n{}", display_list.len() + 1)
        };

        let mut el = Element::new("text")
            .att("id", format!("{}_{}", slot, ctx.item_id_base))
            .att("name", &slot)
            .att("text", &text.value)
            // the source format insets text boxes by 4 units on each side
            .att(
                "xy",
                format!(
                    "{},{}",
                    node.bounds.left - root.bounds.left - 4,
                    node.bounds.top - root.bounds.top - 4
                ),
            )
            .att(
                "size",
                format!("{},{}", node.bounds.width + 8, node.bounds.height + 8),
            );
        if let Some(run) = text.first_run() {
            if run.align != TextAlign::Left {
                el.set_att("align", run.align.as_str());
            }
            el.set_att("vAlign", "middle");
            el.set_att("autoSize", "none");
            if !ctx.options.contains(ExportOptions::IGNORE_FONT) {
                el.set_att("font", &run.font);
            }
            el.set_att("fontSize", run.size_pt.to_string());
            el.set_att("color", html_color(run.color, false));
        } else {
            el.set_att("vAlign", "middle");
            el.set_att("autoSize", "none");
        }
        child = Some(el);
    } else if let Some(pixels) = node.pixels().filter(|px| !px.rgba.is_empty()) {
        let item = ctx.registry.register(
            ResourceKind::Image,
            &format!("{}.png", name),
            Some(&pixels.rgba),
            pixels.encoded.clone(),
            false,
        );

        let slot = if usage == Some(SpecialUsage::Bar) {
            "bar".to_string()
        } else {
            format!("n{}", display_list.len() + 1)
        };
        let tag = if usage == Some(SpecialUsage::Icon) {
            "loader"
        } else {
            "image"
        };
        let mut el = Element::new(tag)
            .att("id", format!("{}_{}", slot, ctx.item_id_base))
            .att("name", usage.map(SpecialUsage::as_str).unwrap_or(&slot))
            .att("xy", xy_of(node, root));
        if usage == Some(SpecialUsage::Icon) {
            // icon leaves become loaders driven by a resource url, so the
            // enclosing button can retarget them
            el.set_att("size", size_of(node));
            el.set_att("url", format!("ui://{}{}", ctx.package_id, item.id));
        } else {
            el.set_att("src", &item.id);
        }
        el.set_att("fileName", &item.name);
        child = Some(el);
    }

    if let Some(mut el) = child {
        if node.opacity < 255 {
            el.set_att("alpha", format!("{:.2}", node.opacity as f32 / 255.0));
        }
        if let Some(cb) = on_element.as_deref_mut() {
            cb(&mut el, node);
        }
        display_list.push(el);
    }

    Ok(())
}
