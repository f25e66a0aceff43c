#[cfg(test)]
use std::fs;
#[cfg(test)]
use std::path::Path;

/// Writes `content` to `root/relative`, creating the parent directories.
#[cfg(test)]
pub fn write_post(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[cfg(test)]
pub const ATTRACTION_POST: &str = "---
title: Muzeul Brukenthal
date: 2024-03-15
layout: travel-attraction
folder: brukenthal
imagine: cover.jpg
atractie: Muzeul Național Brukenthal
id-oras: 12
position: 1
oras: Sibiu
tara: România
text-intro: Cel mai vechi muzeu din România.<hr>Deschis din 1817.
website: https://www.brukenthalmuseum.ro/
phone: +40 269 217 691
adresa: Piața Mare 5, Sibiu
latitudine: 45.7969
longitudine: 24.1522
tags: [muzeu, sibiu]
---

Muzeul Brukenthal este cel mai vechi muzeu din {{ page.oras }}.

{% include contacte-atractie.html %}

## Istoric

Colecția a fost deschisă publicului în 1817.

![Fațada](/assets/images/travel/brukenthal/fatada.jpg)

## Program

{% include galerie-atractie.html %}

{% include a-anchor-backlink.html %}
";

#[cfg(test)]
pub const CITY_POST: &str = "---
title: Ce să vezi în Sibiu
date: 2024-06-01
cat: blog-oras
id-oras: 12
no-atractii: 2
oras: Sibiu
---

Sibiu are multe de oferit.

{% include locuri-de-vizitat.html %}

{% include cta-cazare.html %}
";

#[cfg(test)]
pub const LANDING_POST: &str = "---
title: Locuri de vizitat în Sibiu
date: 2024-01-10
subcat: lv
id-oras: 12
anchors:
  - Piața Mare
  - Turnul Sfatului
  - Podul Minciunilor
---

## Piața Mare
";
