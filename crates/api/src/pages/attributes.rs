//! HTML rendering for the organization attributes settings page.

use agenda_core::attributes::AttributeType;
use agenda_core::types::DbId;
use agenda_db::models::attribute::Attribute;
use agenda_db::models::organization::Organization;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Path of the attributes settings page for `org_id`.
pub fn attributes_page_path(org_id: DbId) -> String {
    format!("/settings/organizations/{org_id}/attributes")
}

/// Render the full attributes page.
///
/// Members see the list; the edit/delete actions and the "Add attribute"
/// form are only rendered when `can_manage` is set.
pub fn render_attributes_page(
    organization: &Organization,
    attributes: &[Attribute],
    can_manage: bool,
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>Attributes | {}</title>\n</head>\n<body>\n",
        encode_text(&organization.name)
    ));
    html.push_str("<main class=\"settings\">\n<header>\n<h1>Attributes</h1>\n");
    html.push_str(
        "<p class=\"description\">Create and manage attributes for the users of your organization.</p>\n</header>\n",
    );

    if attributes.is_empty() {
        html.push_str(&render_empty_state(can_manage));
    } else {
        html.push_str(&render_attribute_list(attributes, can_manage));
    }

    if can_manage {
        html.push_str(&render_create_form(organization.id));
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_empty_state(can_manage: bool) -> String {
    let mut html = String::from("<section class=\"empty-state\">\n<h2>Add attributes</h2>\n");
    html.push_str(
        "<p>Attributes describe the users of your organization, for example their department or location.</p>\n",
    );
    if can_manage {
        html.push_str(
            "<a class=\"button\" href=\"#new-attribute\" role=\"button\">New attribute</a>\n",
        );
    }
    html.push_str("</section>\n");
    html
}

fn render_attribute_list(attributes: &[Attribute], can_manage: bool) -> String {
    let mut html = String::from("<ul class=\"attribute-list\">\n");
    for attribute in attributes {
        let label = attribute
            .kind()
            .map(AttributeType::label)
            .unwrap_or(attribute.attribute_type.as_str());

        html.push_str(&format!(
            "<li data-slug=\"{}\">\n<span class=\"name\">{}</span>\n<span class=\"type\">{}</span>\n",
            encode_double_quoted_attribute(&attribute.slug),
            encode_text(&attribute.name),
            encode_text(label),
        ));
        html.push_str(&format!(
            "<input type=\"checkbox\" role=\"switch\" aria-label=\"Enabled\"{}{}>\n",
            if attribute.enabled { " checked" } else { "" },
            if can_manage { "" } else { " disabled" },
        ));
        if can_manage {
            html.push_str(&format!(
                "<span class=\"actions\"><a href=\"#edit-{id}\">Edit</a> <a href=\"#delete-{id}\">Delete</a></span>\n",
                id = attribute.id,
            ));
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n");
    html
}

fn render_create_form(org_id: DbId) -> String {
    let mut html = format!(
        "<form id=\"new-attribute\" method=\"post\" action=\"{}\">\n<h2>Add attribute</h2>\n",
        encode_double_quoted_attribute(&attributes_page_path(org_id))
    );
    html.push_str(
        "<label for=\"attribute-name\">Name</label>\n<input id=\"attribute-name\" name=\"name\" type=\"text\" required maxlength=\"100\">\n",
    );
    html.push_str("<label for=\"attribute-type\">Type</label>\n<select id=\"attribute-type\" name=\"type\">\n");
    for kind in AttributeType::ALL {
        html.push_str(&format!(
            "<option value=\"{}\">{}</option>\n",
            kind.as_str(),
            kind.label()
        ));
    }
    html.push_str("</select>\n<button type=\"submit\">Save</button>\n</form>\n");
    html
}
