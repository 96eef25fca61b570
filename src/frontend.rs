use crate::{
    controller::Controller,
    portfolio::{Achievement, Interest, PortfolioData, Project, Skill, Social},
    theme::Theme,
};
use gloo_net::http::Request;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;
use yew::prelude::*;

const PORTFOLIO_ENDPOINT: &str = "/api/portfolio";
const RESUME_ENDPOINT: &str = "/download-resume";

const NAV_SECTIONS: [(&str, &str); 5] = [
    ("about", "About"),
    ("skills", "Skills"),
    ("projects", "Projects"),
    ("achievements", "Achievements"),
    ("contact", "Contact"),
];

async fn fetch_portfolio() -> Option<PortfolioData> {
    let response = Request::get(PORTFOLIO_ENDPOINT).send().await.ok()?;
    if !response.ok() {
        return None;
    }
    response.json::<PortfolioData>().await.ok()
}

fn is_set(link: &str) -> bool {
    !link.is_empty() && link != "#"
}

#[derive(Properties, PartialEq)]
struct ExternalLinkProps {
    href: AttrValue,
    label: AttrValue,
    #[prop_or_default]
    class: AttrValue,
}

#[function_component(ExternalLink)]
fn external_link(props: &ExternalLinkProps) -> Html {
    html! {
        <a
            class={props.class.clone()}
            href={props.href.clone()}
            target="_blank"
            rel="noopener noreferrer"
        >
            {props.label.clone()}
            <span class="external-mark" aria-hidden="true">{"↗"}</span>
            <span class="sr-only">{" (opens in a new tab)"}</span>
        </a>
    }
}

#[derive(Properties, PartialEq)]
struct NavbarProps {
    name: AttrValue,
}

#[function_component(Navbar)]
fn navbar(props: &NavbarProps) -> Html {
    html! {
        <nav class="navbar">
            <a class="nav-logo" href="#home">{props.name.clone()}</a>
            <ul class="nav-links">
                { for NAV_SECTIONS.iter().map(|(id, label)| html! {
                    <li><a class="nav-link" href={format!("#{id}")}>{*label}</a></li>
                }) }
            </ul>
            <button id="themeToggle" class="theme-toggle" type="button" aria-label="Toggle theme">
                <span class="theme-icon" aria-hidden="true">{Theme::default().glyph()}</span>
            </button>
        </nav>
    }
}

#[derive(Properties, PartialEq)]
struct HeroProps {
    name: AttrValue,
    title: AttrValue,
}

#[function_component(Hero)]
fn hero(props: &HeroProps) -> Html {
    html! {
        <section id="home" class="hero">
            <div class="rotating-cube" aria-hidden="true"></div>
            <div class="hero-content">
                <h1 class="hero-title">{props.name.clone()}</h1>
                <p class="hero-subtitle">{props.title.clone()}</p>
                <div class="hero-actions">
                    <a class="button primary" href="#projects">{"View projects"}</a>
                    <a class="button" href="#contact">{"Get in touch"}</a>
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct SkillCardProps {
    skill: Skill,
}

#[function_component(SkillCard)]
fn skill_card(props: &SkillCardProps) -> Html {
    let skill = &props.skill;
    html! {
        <article class="skill-card">
            <span class="skill-icon" aria-hidden="true">{skill.icon.clone()}</span>
            <h3>{skill.name.clone()}</h3>
            <p>{skill.description.clone()}</p>
        </article>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: Project,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let project = &props.project;
    let preview = project.preview_url().map(|url| {
        html! {
            <div class="project-preview-frame">
                <iframe
                    class="project-preview"
                    src={url.to_string()}
                    title={format!("{} live preview", project.name)}
                    loading="lazy"
                    tabindex="-1"
                    sandbox="allow-scripts allow-same-origin"
                ></iframe>
            </div>
        }
    });

    html! {
        <article class="project-card" data-has-preview={project.has_preview.to_string()}>
            { for preview }
            <div class="project-body">
                <span class="project-type">{project.kind.clone()}</span>
                <h3>{project.name.clone()}</h3>
                <p>{project.description.clone()}</p>
                <ul class="tech-list">
                    { for project.tech.iter().map(|tech| html! {
                        <li class="tech-badge">{tech.clone()}</li>
                    }) }
                </ul>
                <div class="project-links">
                    if !project.live_url.is_empty() {
                        <ExternalLink href={project.live_url.clone()} label="Live" class="link" />
                    }
                    if !project.github_url.is_empty() {
                        <ExternalLink href={project.github_url.clone()} label="Source" class="link" />
                    }
                </div>
            </div>
        </article>
    }
}

#[derive(Properties, PartialEq)]
struct AchievementCardProps {
    achievement: Achievement,
}

#[function_component(AchievementCard)]
fn achievement_card(props: &AchievementCardProps) -> Html {
    let achievement = &props.achievement;
    html! {
        <article class="achievement-card">
            if achievement.image_url.is_empty() {
                <span class="achievement-icon" aria-hidden="true">{achievement.icon.clone()}</span>
            } else {
                <img class="achievement-image" src={achievement.image_url.clone()} alt={achievement.title.clone()} loading="lazy" />
            }
            <h3>{achievement.title.clone()}</h3>
            if !achievement.date.is_empty() {
                <p class="muted">{achievement.date.clone()}</p>
            }
            <p>{achievement.description.clone()}</p>
        </article>
    }
}

#[derive(Properties, PartialEq)]
struct InterestsProps {
    interests: Vec<Interest>,
}

#[function_component(Interests)]
fn interests(props: &InterestsProps) -> Html {
    if props.interests.is_empty() {
        return html! {};
    }
    html! {
        <section id="interests" class="section">
            <h2 class="section-title">{"Interests"}</h2>
            <ul class="interest-list">
                { for props.interests.iter().map(|interest| html! {
                    <li class="interest">
                        <span aria-hidden="true">{interest.emoji.clone()}</span>
                        {" "}{interest.text.clone()}
                    </li>
                }) }
            </ul>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ContactProps {
    intro: AttrValue,
    email: AttrValue,
    phone: AttrValue,
    social: Social,
}

#[function_component(ContactSection)]
fn contact_section(props: &ContactProps) -> Html {
    let socials = [
        ("LinkedIn", props.social.linkedin.as_str()),
        ("GitHub", props.social.github.as_str()),
        ("Twitter", props.social.twitter.as_str()),
        ("Website", props.social.website.as_str()),
    ];

    html! {
        <section id="contact" class="section">
            <h2 class="section-title">{"Contact"}</h2>
            <p class="section-intro">{props.intro.clone()}</p>
            <div class="contact-grid">
                <a class="contact-card" href={format!("mailto:{}", props.email)}>
                    <span class="contact-label">{"Email"}</span>
                    <span>{props.email.clone()}</span>
                </a>
                if !props.phone.is_empty() {
                    <a class="contact-card" href={format!("tel:{}", props.phone)}>
                        <span class="contact-label">{"Phone"}</span>
                        <span>{props.phone.clone()}</span>
                    </a>
                }
                { for socials.into_iter().filter(|(_, link)| is_set(link)).map(|(label, link)| html! {
                    <div class="contact-card">
                        <ExternalLink href={link.to_string()} label={label} class="link" />
                    </div>
                }) }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct PageProps {
    data: PortfolioData,
}

#[function_component(Page)]
fn page(props: &PageProps) -> Html {
    let data = &props.data;
    html! {
        <>
            <Navbar name={data.personal.name.clone()} />
            <main id="content">
                <Hero name={data.personal.name.clone()} title={data.personal.title.clone()} />

                <section id="about" class="section">
                    <h2 class="section-title">{"About"}</h2>
                    <p class="section-intro">{data.about.intro.clone()}</p>
                    <p>{data.about.paragraph_1.clone()}</p>
                    <p>{data.about.paragraph_2.clone()}</p>
                </section>

                <section id="skills" class="section">
                    <h2 class="section-title">{"Skills"}</h2>
                    <div class="card-grid">
                        { for data.skills.iter().map(|skill| html! { <SkillCard skill={skill.clone()} /> }) }
                    </div>
                </section>

                <section id="projects" class="section">
                    <h2 class="section-title">{"Projects"}</h2>
                    <div class="card-grid">
                        { for data.projects.iter().map(|project| html! { <ProjectCard project={project.clone()} /> }) }
                    </div>
                </section>

                <section id="achievements" class="section">
                    <h2 class="section-title">{"Achievements"}</h2>
                    <div class="card-grid">
                        { for data.achievements.iter().map(|achievement| html! {
                            <AchievementCard achievement={achievement.clone()} />
                        }) }
                    </div>
                </section>

                <Interests interests={data.interests.clone()} />

                <section id="resume" class="section">
                    <h2 class="section-title">{"Resume"}</h2>
                    <p>{data.resume.description.clone()}</p>
                    <a class="button primary" href={RESUME_ENDPOINT}>{"Download resume"}</a>
                </section>

                <ContactSection
                    intro={data.contact.intro.clone()}
                    email={data.personal.email.clone()}
                    phone={data.personal.phone.clone()}
                    social={data.social.clone()}
                />
            </main>
            <footer class="footer">
                <p class="muted">{format!("© {}", data.personal.name)}</p>
            </footer>
        </>
    }
}

#[function_component(App)]
fn app() -> Html {
    let portfolio = use_state(|| None::<PortfolioData>);

    {
        let portfolio = portfolio.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let data = match fetch_portfolio().await {
                    Some(data) => data,
                    None => {
                        gloo::console::warn!("portfolio data unavailable, rendering placeholders");
                        PortfolioData::placeholder()
                    }
                };
                portfolio.set(Some(data));
            });
            || ()
        });
    }

    // The behaviors attach to rendered markup, so install only once the page
    // content is in the DOM.
    use_effect_with(portfolio.is_some(), move |rendered| {
        let controller = if *rendered {
            match Controller::install() {
                Ok(controller) => Some(controller),
                Err(error) => {
                    gloo::console::error!("page behaviors not installed:", error.to_string());
                    None
                }
            }
        } else {
            None
        };
        move || drop(controller)
    });

    match (*portfolio).clone() {
        Some(data) => html! { <Page {data} /> },
        None => html! { <div class="page-loading" aria-busy="true"></div> },
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
