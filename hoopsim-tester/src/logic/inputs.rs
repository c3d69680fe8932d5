use anyhow::{Context, Result, bail};
use hoopsim_game::AttributeKey;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse `shooting=Michael Jordan,passing=Magic Johnson,...`.
pub fn parse_picks(raw: &str) -> Result<Vec<(AttributeKey, String)>> {
    split_csv(raw)
        .into_iter()
        .map(|pair| {
            let (key, name) = pair
                .split_once('=')
                .with_context(|| format!("pick `{pair}` is not attribute=player"))?;
            let key: AttributeKey = key.parse().map_err(anyhow::Error::msg)?;
            let name = name.trim();
            if name.is_empty() {
                bail!("pick for {key} names no player");
            }
            Ok((key, name.to_string()))
        })
        .collect()
}

/// Parse `Name=p1|p2|p3|p4|p5;Name2=...` into named lineups in slot order.
pub fn parse_teams(raw: &str) -> Result<Vec<(String, Vec<String>)>> {
    raw.split(';')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            let (name, players) = chunk
                .split_once('=')
                .with_context(|| format!("team `{chunk}` is not Name=p1|p2|p3|p4|p5"))?;
            let lineup: Vec<String> = players
                .split('|')
                .map(|player| player.trim().to_string())
                .filter(|player| !player.is_empty())
                .collect();
            Ok((name.trim().to_string(), lineup))
        })
        .collect()
}
