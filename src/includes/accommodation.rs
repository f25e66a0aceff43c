use crate::includes::{render_template, IncludeContext};

const ACCOMMODATION_TPL: &str = r##"<div class="my-6 sm:my-8 p-4 sm:p-6 bg-primary/10 border border-primary/20 rounded-lg">
<h3 class="text-lg font-bold mb-2 text-foreground">{{heading}}</h3>
<p class="text-sm text-muted-foreground mb-4">{{text}}</p>
<a href="#" class="inline-flex items-center gap-2 px-4 py-2 bg-primary-600 hover:bg-primary-700 text-white rounded-lg transition-colors text-sm font-medium">{{button}}</a>
</div>
"##;

#[derive(ramhorns::Content)]
struct AccommodationCta<'a> {
    heading: &'a str,
    text: &'a str,
    button: &'a str,
}

pub fn render(ctx: &IncludeContext) -> String {
    let locale = ctx.locale;
    render_template("accommodation", ACCOMMODATION_TPL, &AccommodationCta {
        heading: locale.pick("Căutați cazare?", "Looking for accommodation?"),
        text: locale.pick(
            "Descoperiți cele mai bune oferte de cazare în zonă.",
            "Discover the best accommodation deals in the area.",
        ),
        button: locale.pick("Vezi Oferte", "View Offers"),
    })
}

#[cfg(test)]
mod tests {
    use crate::corpus::Corpus;
    use crate::includes::tests::render_for;
    use crate::includes::Include;
    use crate::locale::Locale;

    #[test]
    fn test_bilingual() {
        let corpus = Corpus::from_posts(Locale::Ro, vec![]);
        let ro = render_for(Include::AccommodationCta, "title: x", Locale::Ro, &corpus);
        assert!(ro.contains(">Căutați cazare?</h3>"));
        assert!(ro.contains(">Vezi Oferte</a>"));

        let en = render_for(Include::AccommodationCta, "title: x", Locale::En, &corpus);
        assert!(en.contains(">Looking for accommodation?</h3>"));
        assert!(en.contains("Discover the best accommodation deals in the area."));
        assert!(en.contains(">View Offers</a>"));
    }
}
