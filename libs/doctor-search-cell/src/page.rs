use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ConsultMode, CriteriaUpdate, DirectoryStatus, Doctor, SearchCriteria, SortBy};
use crate::services::filter::{apply_criteria, speciality_options};
use crate::services::query::{apply_update, location_with_query, query_pairs, query_string_to_criteria, SEARCH_PARAM};

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static pattern is valid"));

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; background: #f4f6f8; }
.search-header { background: #1f4fa8; padding: 16px; }
.search-input-container { position: relative; max-width: 720px; margin: 0 auto; display: flex; }
.search-input { flex: 1; padding: 10px; font-size: 16px; }
.suggestions-dropdown { position: absolute; top: 100%; left: 0; right: 0; background: #fff; border: 1px solid #ccc; z-index: 10; }
.suggestion-item { padding: 8px 12px; cursor: pointer; }
.suggestion-item:hover { background: #eef2f8; }
.main-content { display: flex; gap: 16px; max-width: 1100px; margin: 16px auto; }
.filters-panel { width: 280px; background: #fff; padding: 12px; }
.filter-options label { display: block; margin: 6px 0; }
.filters-header { display: flex; justify-content: space-between; align-items: center; }
.doctor-list { flex: 1; }
.doctor-card { display: flex; justify-content: space-between; background: #fff; padding: 16px; margin-bottom: 12px; }
.doctor-info { display: flex; gap: 16px; }
.doctor-avatar img { width: 80px; height: 80px; border-radius: 50%; }
.consult-badge { display: inline-block; padding: 2px 8px; margin-right: 4px; border-radius: 4px; background: #e6f0ff; }
"#;

/// Browser side of the page. `SearchSession` models the same history and
/// suggestion transitions in Rust; keep the two in step.
const SCRIPT: &str = r#"
(function () {
  var root = document.querySelector('.doctor-search-container');
  var grace = parseInt(root.getAttribute('data-suggestion-grace-ms'), 10) || 200;
  var suggestionsUrl = root.getAttribute('data-suggestions-url');

  document.querySelectorAll('input[data-href]').forEach(function (el) {
    el.addEventListener('change', function () { location.replace(el.getAttribute('data-href')); });
  });

  function withSearch(value) {
    var params = new URLSearchParams(location.search);
    if (value) { params.set('search', value); } else { params.delete('search'); }
    var qs = params.toString();
    return location.pathname + (qs ? '?' + qs : '');
  }

  var form = document.querySelector('.search-form');
  var input = document.querySelector('[data-testid="search-input"]');
  var dropdown = document.querySelector('[data-testid="suggestions-dropdown"]');
  var hideTimer = null;

  function hide() { dropdown.hidden = true; dropdown.innerHTML = ''; }

  form.addEventListener('submit', function (e) {
    e.preventDefault();
    hide();
    location.replace(withSearch(input.value));
  });

  input.addEventListener('input', function () {
    var q = input.value;
    if (!q.trim()) { hide(); return; }
    fetch(suggestionsUrl + '?q=' + encodeURIComponent(q))
      .then(function (r) { return r.json(); })
      .then(function (body) {
        if (input.value !== q) { return; }
        dropdown.innerHTML = '';
        body.suggestions.forEach(function (s) {
          var item = document.createElement('div');
          item.className = 'suggestion-item';
          item.setAttribute('data-testid', 'suggestion-' + s.id);
          item.textContent = s.name;
          item.addEventListener('click', function () {
            input.value = s.name;
            hide();
            location.replace(withSearch(s.name));
          });
          dropdown.appendChild(item);
        });
        dropdown.hidden = body.suggestions.length === 0;
      })
      .catch(hide);
  });

  input.addEventListener('blur', function () { hideTimer = setTimeout(hide, grace); });
  input.addEventListener('focus', function () { clearTimeout(hideTimer); });

  var specialitySearch = document.querySelector('[data-testid="speciality-search"]');
  specialitySearch.addEventListener('input', function () {
    var needle = specialitySearch.value.trim().toLowerCase();
    document.querySelectorAll('.checkbox-option').forEach(function (label) {
      var box = label.querySelector('input');
      var name = label.getAttribute('data-name').toLowerCase();
      label.hidden = needle !== '' && !box.checked && name.indexOf(needle) === -1;
    });
  });
})();
"#;

pub struct PageContext<'a> {
    pub path: &'a str,
    pub query: &'a str,
    pub status: &'a DirectoryStatus,
    pub doctors: &'a [Doctor],
    pub suggestions_url: &'a str,
    pub suggestion_grace_ms: u128,
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Test id slug for a speciality checkbox: lowercased, whitespace runs
/// collapsed to a single dash.
pub fn speciality_test_id(name: &str) -> String {
    format!("speciality-{}", WHITESPACE_RUN.replace_all(&name.to_lowercase(), "-"))
}

pub fn render_loading() -> String {
    concat!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">",
        "<meta http-equiv=\"refresh\" content=\"1\"><title>Find a Doctor</title></head>",
        "<body><p>Loading doctors...</p></body></html>"
    )
    .to_string()
}

/// Renders the search page for the URL `path?query`.
pub fn render_page(ctx: &PageContext<'_>) -> String {
    if ctx.status.is_loading() {
        return render_loading();
    }

    let criteria = query_string_to_criteria(ctx.query);
    let view = apply_criteria(ctx.doctors, &criteria);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<title>Find a Doctor</title><style>");
    html.push_str(STYLE);
    html.push_str("</style></head><body>");
    html.push_str(&format!(
        "<div class=\"doctor-search-container\" data-suggestions-url=\"{}\" data-suggestion-grace-ms=\"{}\">",
        escape_html(ctx.suggestions_url),
        ctx.suggestion_grace_ms
    ));

    render_search_form(&mut html, ctx, &criteria);

    html.push_str("<div class=\"main-content\"><aside class=\"filters-panel\">");
    render_sort_section(&mut html, ctx, &criteria);
    html.push_str(&format!(
        "<div class=\"filters-header\"><h3>Filters</h3>\
         <a class=\"clear-all-btn\" href=\"{}\" data-testid=\"clear-all-button\">Clear All</a></div>",
        escape_html(ctx.path)
    ));
    render_speciality_section(&mut html, ctx, &criteria);
    render_consult_section(&mut html, ctx, &criteria);
    html.push_str("</aside><main class=\"doctor-list\">");

    match ctx.status {
        DirectoryStatus::Failed { .. } => html.push_str(
            "<div class=\"directory-unavailable\" data-testid=\"directory-unavailable\">\
             <p>The doctor directory could not be loaded. Please try again later.</p></div>",
        ),
        _ if view.is_empty() => html.push_str(
            "<div class=\"no-results\" data-testid=\"no-results\">\
             <p>No doctors found matching your criteria.</p></div>",
        ),
        _ => {
            for doctor in &view {
                render_doctor_card(&mut html, doctor);
            }
        }
    }

    html.push_str("</main></div></div><script>");
    html.push_str(SCRIPT);
    html.push_str("</script></body></html>");
    html
}

fn target(ctx: &PageContext<'_>, update: &CriteriaUpdate) -> String {
    escape_html(&location_with_query(ctx.path, &apply_update(ctx.query, update)))
}

fn checked(on: bool) -> &'static str {
    if on {
        " checked"
    } else {
        ""
    }
}

fn render_search_form(html: &mut String, ctx: &PageContext<'_>, criteria: &SearchCriteria) {
    html.push_str(&format!(
        "<header class=\"search-header\"><form class=\"search-form\" method=\"get\" action=\"{}\">",
        escape_html(ctx.path)
    ));

    // Carry the rest of the URL state through a plain form submit.
    for (key, value) in query_pairs(ctx.query) {
        if key == SEARCH_PARAM {
            continue;
        }
        html.push_str(&format!(
            "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
            escape_html(&key),
            escape_html(&value)
        ));
    }

    html.push_str(&format!(
        "<div class=\"search-input-container\">\
         <input type=\"text\" name=\"search\" value=\"{}\" \
         placeholder=\"Search Symptoms, Doctors, Specialists, Clinics\" autocomplete=\"off\" \
         data-testid=\"search-input\" class=\"search-input\">\
         <button type=\"submit\" class=\"search-button\" data-testid=\"search-button\">\
         <i class=\"search-icon\">🔍</i></button>\
         <div class=\"suggestions-dropdown\" data-testid=\"suggestions-dropdown\" hidden></div>\
         </div></form></header>",
        escape_html(&criteria.search)
    ));
}

fn render_sort_section(html: &mut String, ctx: &PageContext<'_>, criteria: &SearchCriteria) {
    html.push_str(
        "<div class=\"filter-section\"><div class=\"filter-header\"><h3>Sort by</h3></div>\
         <div class=\"filter-options\">",
    );
    for sort in SortBy::ALL {
        html.push_str(&format!(
            "<label class=\"radio-option\"><input type=\"radio\" name=\"sort\"{} \
             data-href=\"{}\" data-testid=\"sort-by-{}\"><span>{}</span></label>",
            checked(criteria.sort_by == Some(sort)),
            target(ctx, &CriteriaUpdate::sort_by(Some(sort))),
            sort.as_str(),
            sort.label()
        ));
    }
    html.push_str("</div></div>");
}

fn render_speciality_section(html: &mut String, ctx: &PageContext<'_>, criteria: &SearchCriteria) {
    html.push_str(
        "<div class=\"filter-section\"><div class=\"filter-header\"><h3>Specialities</h3></div>\
         <div class=\"filter-search\"><input type=\"text\" placeholder=\"Search specialities\" \
         class=\"speciality-search\" data-testid=\"speciality-search\"></div>\
         <div class=\"filter-options\">",
    );
    for name in speciality_options(ctx.doctors) {
        let update = CriteriaUpdate::specialities(criteria.toggled_specialities(&name));
        html.push_str(&format!(
            "<label class=\"checkbox-option\" data-name=\"{}\"><input type=\"checkbox\"{} \
             data-href=\"{}\" data-testid=\"{}\"><span>{}</span></label>",
            escape_html(&name),
            checked(criteria.has_speciality(&name)),
            target(ctx, &update),
            escape_html(&speciality_test_id(&name)),
            escape_html(&name)
        ));
    }
    html.push_str("</div></div>");
}

fn render_consult_section(html: &mut String, ctx: &PageContext<'_>, criteria: &SearchCriteria) {
    html.push_str(
        "<div class=\"filter-section\"><div class=\"filter-header\"><h3>Mode of consultation</h3></div>\
         <div class=\"filter-options\">",
    );

    let choices = [
        (Some(ConsultMode::Video), "video-consult", ConsultMode::Video.as_str()),
        (Some(ConsultMode::InClinic), "in-clinic-consult", ConsultMode::InClinic.as_str()),
        (None, "all-consult", "All"),
    ];
    for (mode, test_id, label) in choices {
        html.push_str(&format!(
            "<label class=\"radio-option\"><input type=\"radio\" name=\"consultMode\"{} \
             data-href=\"{}\" data-testid=\"{}\"><span>{}</span></label>",
            checked(criteria.consult_mode == mode),
            target(ctx, &CriteriaUpdate::consult_mode(mode)),
            test_id,
            label
        ));
    }
    html.push_str("</div></div>");
}

fn render_doctor_card(html: &mut String, doctor: &Doctor) {
    let id = escape_html(&doctor.id);
    let specialities: Vec<&str> = doctor.speciality_names().collect();

    html.push_str(&format!(
        "<div class=\"doctor-card\" data-testid=\"doctor-card-{id}\"><div class=\"doctor-info\">\
         <div class=\"doctor-avatar\"><img src=\"{avatar}\" alt=\"{name}\"></div>\
         <div class=\"doctor-details\"><h2 class=\"doctor-name\">{name}</h2>\
         <p class=\"doctor-speciality\">{specialities}</p>\
         <p class=\"doctor-qualifications\">{qualifications}</p>\
         <p class=\"doctor-experience\">{experience}</p>\
         <div class=\"doctor-clinic\"><i class=\"clinic-icon\">🏥</i><span>{clinic}</span></div>\
         <div class=\"doctor-location\"><i class=\"location-icon\">📍</i><span>{locality}</span></div>\
         <div class=\"doctor-languages\"><i class=\"language-icon\">🗣️</i><span>{languages}</span></div>\
         </div></div>",
        id = id,
        avatar = escape_html(&doctor.avatar_url()),
        name = escape_html(&doctor.name),
        specialities = escape_html(&specialities.join(", ")),
        qualifications = escape_html(doctor.qualifications()),
        experience = escape_html(&doctor.experience),
        clinic = escape_html(&doctor.clinic.name),
        locality = escape_html(&doctor.clinic.address.locality),
        languages = escape_html(&doctor.languages.join(", ")),
    ));

    html.push_str(&format!(
        "<div class=\"appointment-section\"><div class=\"doctor-fees\">{}</div><div class=\"consult-modes\">",
        escape_html(&doctor.fees)
    ));
    if doctor.in_clinic {
        html.push_str("<span class=\"consult-badge clinic\">In-clinic</span>");
    }
    if doctor.video_consult {
        html.push_str("<span class=\"consult-badge video\">Video</span>");
    }
    // Booking is not offered yet; the button is inert.
    html.push_str(&format!(
        "</div><button type=\"button\" class=\"book-button\" data-testid=\"book-appointment-{}\">\
         Book Appointment</button></div></div>",
        id
    ));
}
