fn main() {
    fintrack_frontend::logging::init();
    yew::Renderer::<fintrack_frontend::App>::new().render();
}
