//! Server-rendered HTML pages.

use crate::models::{Account, Task};
use crate::notice::Notice;

const STYLE: &str = "
body { font-family: system-ui, sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }
header { display: flex; justify-content: space-between; align-items: baseline; }
.notice { background: #eef6ff; border: 1px solid #9cc3f5; padding: .5rem 1rem; }
#tasks { list-style: none; padding: 0; }
#tasks li { display: flex; gap: .5rem; align-items: center; padding: .4rem 0; border-bottom: 1px solid #ddd; cursor: grab; }
#tasks li.done .text { text-decoration: line-through; color: #888; }
.category { font-size: .8rem; background: #eee; border-radius: .3rem; padding: 0 .4rem; }
.due { font-size: .8rem; color: #a33; }
form.inline { display: inline-flex; gap: .25rem; margin-left: auto; }
";

const REORDER_SCRIPT: &str = r#"
const list = document.getElementById("tasks");
let dragged = null;
list.addEventListener("dragstart", (e) => { dragged = e.target.closest("li"); });
list.addEventListener("dragover", (e) => e.preventDefault());
list.addEventListener("drop", (e) => {
  e.preventDefault();
  const target = e.target.closest("li");
  if (!dragged || !target || dragged === target) return;
  const items = [...list.children];
  const oldIndex = items.indexOf(dragged);
  const newIndex = items.indexOf(target);
  if (oldIndex < newIndex) target.after(dragged); else target.before(dragged);
  fetch(list.dataset.base + "/reorder", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({ old_index: oldIndex, new_index: newIndex }),
  }).then((resp) => { if (!resp.ok) window.location.reload(); });
});
"#;

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

fn notice_html(notice: Option<Notice>) -> String {
    notice
        .map(|n| format!("<p class=\"notice\">{}</p>\n", escape(n.message())))
        .unwrap_or_default()
}

fn task_item(base: &str, task: &Task) -> String {
    let id = task.id;
    let text = escape(&task.text);
    let (class, mark) = if task.completed {
        (" class=\"done\"", "&#9745;")
    } else {
        ("", "&#9744;")
    };
    let due = task
        .due_date
        .map(|d| format!("<span class=\"due\">due {d}</span>"))
        .unwrap_or_default();

    format!(
        "<li draggable=\"true\" data-id=\"{id}\"{class}>\
         <a href=\"{base}/toggle/{id}\" title=\"Toggle\">{mark}</a>\
         <span class=\"text\">{text}</span>\
         <span class=\"category\">{category}</span>{due}\
         <form class=\"inline\" method=\"post\" action=\"{base}/edit/{id}\">\
         <input name=\"new_text\" value=\"{text}\" maxlength=\"300\" required>\
         <button>Save</button></form>\
         <a href=\"{base}/delete/{id}\">Delete</a></li>\n",
        category = escape(&task.category),
    )
}

pub fn index_page(
    base_path: &str,
    account: &Account,
    tasks: &[Task],
    notice: Option<Notice>,
) -> String {
    let base = escape(base_path);
    let mut body = format!(
        "<header><h1>Tasks</h1><span>Signed in as {user} &middot; \
         <a href=\"{base}/logout\">Log out</a></span></header>\n",
        user = escape(&account.username),
    );
    body.push_str(&notice_html(notice));
    body.push_str(&format!(
        "<form method=\"post\" action=\"{base}/add\">\
         <input name=\"task\" placeholder=\"What needs doing?\" maxlength=\"300\" required>\
         <input name=\"category\" placeholder=\"General\" maxlength=\"50\">\
         <input type=\"date\" name=\"due_date\">\
         <button>Add</button></form>\n"
    ));

    if tasks.is_empty() {
        body.push_str("<p>No tasks yet.</p>\n");
    }
    body.push_str(&format!("<ul id=\"tasks\" data-base=\"{base}\">\n"));
    for task in tasks {
        body.push_str(&task_item(&base, task));
    }
    body.push_str("</ul>\n");
    body.push_str(&format!("<script>{REORDER_SCRIPT}</script>"));

    layout("Tasks", &body)
}

fn credentials_page(
    title: &str,
    action: &str,
    alternative: (&str, &str),
    base_path: &str,
    notice: Option<Notice>,
) -> String {
    let base = escape(base_path);
    let (alt_path, alt_label) = alternative;
    let mut body = format!("<h1>{title}</h1>\n");
    body.push_str(&notice_html(notice));
    body.push_str(&format!(
        "<form method=\"post\" action=\"{base}{action}\">\
         <p><label>Username <input name=\"username\" required autofocus></label></p>\
         <p><label>Password <input type=\"password\" name=\"password\" required></label></p>\
         <p><button>{title}</button></p></form>\n\
         <p><a href=\"{base}{alt_path}\">{alt_label}</a></p>"
    ));
    layout(title, &body)
}

pub fn login_page(base_path: &str, notice: Option<Notice>) -> String {
    credentials_page(
        "Login",
        "/login",
        ("/register", "Create an account"),
        base_path,
        notice,
    )
}

pub fn register_page(base_path: &str, notice: Option<Notice>) -> String {
    credentials_page(
        "Register",
        "/register",
        ("/login", "Already registered? Log in"),
        base_path,
        notice,
    )
}
