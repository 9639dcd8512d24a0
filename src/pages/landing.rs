use yew::prelude::*;
use log::warn;

use crate::interactions::Interactions;

const FUNDAMENTALS: [(&str, &str); 6] = [
    ("Focus", "Only the messages that matter reach you. Everything else waits until you decide to look."),
    ("Presence", "Spend the evening with the people in the room instead of the ones in your pocket."),
    ("Calm", "No badges, no feeds, no infinite scroll. Just a quiet screen and a clear head."),
    ("Control", "You choose who can interrupt you and when. Rules are simple and always visible."),
    ("Reach", "Friends and family can still get hold of you the way they always have."),
    ("Time", "Hours a week come back to you. Use them for reading, walking, or doing nothing at all."),
];

const FAQ: [(&str, &str); 4] = [
    ("Do I need a new phone?", "No. It works with the phone you already have, smart or not."),
    ("What happens to messages I miss?", "They're collected into a short summary you can read whenever you like."),
    ("Can I try it first?", "Yes. The first two weeks are free and you can cancel at any time."),
    ("Is my data stored?", "Only what's needed to deliver your messages, and it's deleted after delivery."),
];

#[function_component(Landing)]
pub fn landing() -> Html {
    // Attach interactions once the markup is in the document; drop them on unmount.
    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                let interactions = match Interactions::mount() {
                    Ok(interactions) => Some(interactions),
                    Err(e) => {
                        warn!("Interactions unavailable: {}", e);
                        None
                    }
                };
                move || drop(interactions)
            },
            (), // Empty dependencies array means this effect runs only once on mount
        );
    }

    html! {
        <div class="landing-page">
            <header id="top" class="site-header">
                <a href="#top" class="logo">{"quietly"}</a>
                <button class="hamburger-menu" aria-label="Menu">
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <nav class="main-nav">
                    <a href="#fundamentals">{"Why"}</a>
                    <a href="#faq">{"FAQ"}</a>
                    <a href="#get-started">{"Get Started"}</a>
                </nav>
            </header>

            <section class="hero">
                <div class="hero-content fade-in">
                    <h1>{"Less phone. More life."}</h1>
                    <p>{"Stay reachable without staying glued to a screen."}</p>
                    <a href="#get-started" class="hero-cta">{"Get Started"}</a>
                </div>
            </section>

            <section id="fundamentals" class="fundamentals fade-in">
                <h2>{"The fundamentals"}</h2>
                <div class="carousel">
                    <button class="carousel-prev" aria-label="Previous">{"‹"}</button>
                    <div class="carousel-track">
                        { for FUNDAMENTALS.iter().map(|(title, text)| html! {
                            <div class="fundamental-card">
                                <h3>{*title}</h3>
                                <p>{*text}</p>
                            </div>
                        }) }
                    </div>
                    <button class="carousel-next" aria-label="Next">{"›"}</button>
                </div>
                <div class="carousel-dots"></div>
            </section>

            <section id="faq" class="faq fade-in">
                <h2>{"Questions"}</h2>
                { for FAQ.iter().map(|(question, answer)| html! {
                    <div class="faq-item">
                        <button class="faq-question">{*question}</button>
                        <div class="faq-answer"><p>{*answer}</p></div>
                    </div>
                }) }
            </section>

            <section id="get-started" class="get-started fade-in">
                <h2>{"Ready when you are"}</h2>
                <a href="#top" class="hero-cta">{"Back to top"}</a>
            </section>

            <style>
                {r#"
                body.menu-open {
                    overflow: hidden;
                }
                .main-nav.active {
                    transform: translateX(0);
                }
                .hamburger-menu.active span:nth-child(2) {
                    opacity: 0;
                }
                .hero {
                    position: relative;
                    min-height: 80vh;
                    perspective: 1000px;
                    overflow: hidden;
                }
                .hero::before {
                    content: "";
                    position: absolute;
                    inset: -5%;
                    background: url("/assets/hero.jpg") center / cover;
                    transform: rotateX(var(--x-rotation, 0deg)) rotateY(var(--y-rotation, 0deg));
                    transition: transform 0.2s ease-out;
                    z-index: -1;
                }
                .fade-in {
                    opacity: 0;
                    transform: translateY(24px);
                    transition: opacity 0.8s ease, transform 0.8s ease;
                }
                .fade-in.is-visible {
                    opacity: 1;
                    transform: none;
                }
                .carousel {
                    display: flex;
                    align-items: center;
                    gap: 1rem;
                }
                .carousel-track {
                    display: flex;
                    gap: 30px;
                    overflow-x: hidden;
                    cursor: grab;
                    user-select: none;
                    flex: 1;
                }
                .fundamental-card {
                    flex: 0 0 calc((100% - 60px) / 3);
                    transition: transform 0.2s ease;
                }
                .fundamental-card.shrink {
                    transform: scale(0.96);
                }
                .carousel-prev:disabled,
                .carousel-next:disabled {
                    opacity: 0.3;
                    cursor: default;
                }
                .carousel-dots .dot {
                    display: inline-block;
                    width: 8px;
                    height: 8px;
                    margin: 0 4px;
                    border-radius: 50%;
                    background: rgba(255, 255, 255, 0.3);
                    cursor: pointer;
                }
                .carousel-dots .dot.active {
                    background: #7EB2FF;
                }
                .faq-answer {
                    max-height: 0;
                    overflow: hidden;
                    transition: max-height 0.3s ease;
                }
                .faq-item.active .faq-answer {
                    max-height: 400px;
                }
                @media (max-width: 1023px) {
                    .fundamental-card {
                        flex-basis: calc((100% - 30px) / 2);
                    }
                }
                @media (max-width: 767px) {
                    .fundamental-card {
                        flex-basis: 100%;
                    }
                    .main-nav {
                        position: fixed;
                        inset: 0;
                        transform: translateX(100%);
                        transition: transform 0.3s ease;
                    }
                }
                "#}
            </style>
        </div>
    }
}
