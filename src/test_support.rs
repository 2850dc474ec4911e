// Shared fixtures for unit tests.

use crate::config::LoaderConfig;
use crate::markup::{parse_str, MarkupTree};

pub(crate) const SAMPLE_JMDICT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE JMdict [
<!ELEMENT JMdict (entry*)>
<!ENTITY v1 "Ichidan verb">
<!ENTITY vt "transitive verb">
<!ENTITY n "noun (common) (futsuumeishi)">
<!ENTITY oK "word containing out-dated kanji or kanji usage">
<!ENTITY ksb "Kansai-ben">
<!ENTITY geogr "geography">
]>
<JMdict>
<entry>
<ent_seq>1358280</ent_seq>
<k_ele>
<keb>食べる</keb>
<ke_pri>ichi1</ke_pri>
<ke_pri>news2</ke_pri>
</k_ele>
<k_ele>
<keb>喰べる</keb>
<ke_inf>&oK;</ke_inf>
</k_ele>
<r_ele>
<reb>たべる</reb>
<re_pri>ichi1</re_pri>
</r_ele>
<sense>
<pos>&v1;</pos>
<pos>&vt;</pos>
<gloss>to eat</gloss>
</sense>
<sense>
<stagk>食べる</stagk>
<xref>食う・1</xref>
<s_inf>used figuratively</s_inf>
<gloss xml:lang="eng" g_type="fig">to live on (e.g. a salary)</gloss>
<gloss xml:lang="ger">essen</gloss>
</sense>
</entry>
<entry>
<ent_seq>1077140</ent_seq>
<r_ele>
<reb>アルバイト</reb>
<re_nokanji/>
<re_pri>gai1</re_pri>
</r_ele>
<sense>
<pos>&n;</pos>
<lsource xml:lang="ger" ls_type="part" ls_wasei="y">Arbeit</lsource>
<gloss>part-time job</gloss>
<gloss>side job &amp; &quot;baito&quot;</gloss>
</sense>
</entry>
<entry>
<ent_seq>1440380</ent_seq>
<k_ele>
<keb>東京</keb>
</k_ele>
<r_ele>
<reb>とうきょう</reb>
</r_ele>
<r_ele>
<reb>とうけい</reb>
<re_restr>東京</re_restr>
<re_inf>old reading</re_inf>
</r_ele>
<sense>
<pos>&n;</pos>
<field>&geogr;</field>
<dial>&ksb;</dial>
<ant>京都</ant>
<gloss g_gend="neut">Tokyo (capital of Japan)</gloss>
</sense>
</entry>
</JMdict>
"#;

pub(crate) fn sample_tree() -> MarkupTree {
    match parse_str(SAMPLE_JMDICT, &LoaderConfig::default()) {
        Ok(tree) => tree,
        Err(e) => panic!("sample document failed to parse: {}", e),
    }
}
