use crate::inventory::Variant;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2430; background: #f6f7fb; }
header { display: flex; align-items: center; gap: 1.5rem; padding: .75rem 1.5rem; background: #fff; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
header nav ul { display: flex; gap: 1rem; list-style: none; margin: 0; padding: 0; }
header nav a.active { font-weight: 600; color: #524ed2; }
main.container { max-width: 1280px; margin: 1.5rem auto; padding: 0 1rem; }
.card { background: #fff; border-radius: 10px; padding: 1rem 1.25rem; margin-bottom: 1rem; box-shadow: 0 1px 2px rgba(0,0,0,.06); }
.kpis { display: grid; grid-template-columns: repeat(auto-fit, minmax(120px, 1fr)); gap: .75rem; }
.kpi { background: #fff; border-radius: 8px; padding: .75rem; }
.kpi strong { display: block; font-size: 1.5rem; }
.notice { padding: .6rem 1rem; border-radius: 8px; margin-bottom: 1rem; }
.notice-success { background: #e3f7ea; } .notice-info { background: #e6efff; } .notice-danger { background: #fde7e7; }
.floor { display: flex; gap: .5rem; align-items: stretch; margin: .35rem 0; }
.floor-no { width: 3rem; font-weight: 600; }
.unit { display: block; min-width: 7rem; padding: .4rem .5rem; border-radius: 6px; text-decoration: none; color: inherit; border: 1px solid #dfe3ec; }
.tone-success { background: #e3f7ea; } .tone-warning { background: #fff4d6; } .tone-info { background: #e6efff; }
.tone-danger { background: #fde7e7; } .tone-neutral { background: #eceef2; }
.filters, .template-form, .buyer-form { display: flex; flex-wrap: wrap; gap: .5rem; align-items: end; }
label { display: flex; flex-direction: column; font-size: .8rem; gap: .2rem; }
.muted { color: #6b7280; }
"#;

pub fn desktop_layout(title: &str, active: Option<Variant>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Sales Matrix" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    h3 { "Sales Matrix" }
                    nav {
                        ul {
                            li { a href="/" { "Home" } }
                            @for variant in [Variant::Flat, Variant::Plot] {
                                li {
                                    a href={ "/" (variant.slug()) }
                                      class=[(active == Some(variant)).then_some("active")] {
                                        (variant.title())
                                    }
                                }
                            }
                        }
                    }
                }
                (content)
            }
        }
    }
}
